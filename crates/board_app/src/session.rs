use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use board_core::{
    CopyTarget, Effect, FormInput, JobStatus, Msg, Tab, ViewMode, Visibility, DEFAULT_MIN_HEIGHT,
    DEFAULT_MIN_WIDTH,
};
use board_engine::{Clipboard, JobEvent, JobSink, ScrapeService, SubmissionController};
use board_logging::board_info;
use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use crate::cli::ScrapeArgs;
use crate::render::{render, render_projection, status_label};

// How often the shell wakes up while a copy acknowledgment is showing.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// One submission from the command line, printed in the requested view.
///
/// Only the projection goes to `out`; progress and clipboard traffic stay
/// off it so the output can be redirected to a file.
pub async fn run_scrape(
    mut controller: SubmissionController,
    args: ScrapeArgs,
    out: &mut dyn Write,
    clipboard: &dyn Clipboard,
) -> anyhow::Result<ExitCode> {
    let visibility = if args.private {
        Visibility::Private
    } else {
        Visibility::Public
    };
    controller.dispatch(Msg::VisibilityChanged(visibility)).await;
    controller
        .dispatch(Msg::ViewModeSelected(args.view.into()))
        .await;

    eprintln!("Scraping {} ...", args.board_url);
    let effects = controller.dispatch(Msg::SubmitClicked(args.form())).await;
    report_completions(&effects);

    let view = controller.view(Instant::now());
    if let Some(message) = &view.message {
        eprintln!("{message}");
    }
    if view.status != JobStatus::Succeeded {
        return Ok(ExitCode::FAILURE);
    }

    out.write_all(render_projection(&view.projection).as_bytes())
        .and_then(|()| out.flush())
        .context("writing results")?;

    if let Some(target) = args.copy {
        copy(&mut controller, target.into(), clipboard).await;
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn run_health(service: &dyn ScrapeService) -> anyhow::Result<ExitCode> {
    match service.health().await {
        Ok(()) => {
            println!("Scraping service is up.");
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            board_info!("Health check failed: {}", failure);
            eprintln!("{}", failure.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prints the status line as soon as a request goes out.
struct StatusPrinter;

impl JobSink for StatusPrinter {
    fn emit(&self, event: JobEvent) {
        let JobEvent::StatusChanged { status, .. } = event;
        if status == JobStatus::Submitting {
            println!("Status: {}", status_label(status));
        }
    }
}

/// Line-oriented front end over the controller.
///
/// A running scrape blocks further commands until it finishes. While a copy
/// acknowledgment is showing, the shell also wakes on a timer to clear it.
pub async fn run_shell(
    controller: SubmissionController,
    clipboard: &dyn Clipboard,
) -> anyhow::Result<ExitCode> {
    let mut controller = controller.with_sink(Arc::new(StatusPrinter));
    let mut draft = FormDraft::default();
    println!("{HELP}");
    print!("{}", render(&controller.view(Instant::now())));
    controller.consume_dirty();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let next = if controller.state().needs_tick() {
            tokio::select! {
                line = lines.next_line() => line,
                () = tokio::time::sleep(TICK_INTERVAL) => {
                    if let Some(screen) = tick_and_render(&mut controller, Instant::now()) {
                        print!("{screen}");
                        io::stdout().flush().context("writing output")?;
                    }
                    continue;
                }
            }
        } else {
            lines.next_line().await
        };
        let Some(line) = next.context("reading command")? else {
            break;
        };
        controller.tick(Instant::now());

        match parse_command(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => println!("{HELP}"),
            Ok(ShellCommand::Show) => print!("{}", render(&controller.view(Instant::now()))),
            Ok(ShellCommand::Form(edit)) => {
                draft.apply(edit);
                println!("{}", draft.summary());
            }
            Ok(ShellCommand::Dispatch(msg)) => {
                let effects = controller.dispatch(msg).await;
                report_completions(&effects);
                for effect in effects {
                    if let Effect::CopyText { text } = effect {
                        copy_text(&mut controller, &text, clipboard);
                    }
                }
            }
            Ok(ShellCommand::Submit) => match draft.form() {
                Some(form) => {
                    if controller.state().can_submit() {
                        println!("Scraping {} ...", form.board_url);
                    }
                    let effects = controller.dispatch(Msg::SubmitClicked(form)).await;
                    report_completions(&effects);
                }
                None => println!("Set a board URL first: url <URL>"),
            },
            Err(err) => println!("{err}"),
        }

        if controller.consume_dirty() {
            print!("{}", render(&controller.view(Instant::now())));
        }
        io::stdout().flush().context("writing output")?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Runs a timer tick; returns the screen to redraw when the tick changed it.
fn tick_and_render(controller: &mut SubmissionController, now: Instant) -> Option<String> {
    controller.tick(now);
    controller
        .consume_dirty()
        .then(|| render(&controller.view(now)))
}

async fn copy(controller: &mut SubmissionController, target: CopyTarget, clipboard: &dyn Clipboard) {
    for effect in controller.dispatch(Msg::CopyRequested(target)).await {
        if let Effect::CopyText { text } = effect {
            copy_text(controller, &text, clipboard);
        }
    }
}

fn copy_text(controller: &mut SubmissionController, text: &str, clipboard: &dyn Clipboard) {
    if controller.copy(text, clipboard) {
        eprintln!("COPIED!");
    }
}

fn report_completions(effects: &[Effect]) {
    for effect in effects {
        if let Effect::JobCompleted { job_id, pin_count } = effect {
            board_info!("Job {} completed with {} pins", job_id, pin_count);
            eprintln!("Scraped {} pins at {}", pin_count, Local::now().to_rfc3339());
        }
    }
}

const HELP: &str = "\
Commands:
  url <URL>              board to scrape
  keyword [TEXT]         keyword filter (empty clears it)
  size <WIDTH> <HEIGHT>  minimum image size
  public | private       board visibility
  submit                 start scraping
  tab scrape|results|settings
  view grid|list|links|table
  copy tsv|links|image <N>
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormEdit {
    Url(Url),
    Keyword(Option<String>),
    Size { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Form(FormEdit),
    Dispatch(Msg),
    Submit,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "url" => {
            let url = Url::parse(rest).map_err(|err| format!("Invalid board URL: {err}"))?;
            ShellCommand::Form(FormEdit::Url(url))
        }
        "keyword" => ShellCommand::Form(FormEdit::Keyword(
            Some(rest.to_string()).filter(|k| !k.is_empty()),
        )),
        "size" => {
            let mut parts = rest.split_whitespace().map(str::parse::<u32>);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(Ok(width)), Some(Ok(height)), None) => {
                    ShellCommand::Form(FormEdit::Size { width, height })
                }
                _ => return Err("Usage: size <WIDTH> <HEIGHT>".to_string()),
            }
        }
        "public" => ShellCommand::Dispatch(Msg::VisibilityChanged(Visibility::Public)),
        "private" => ShellCommand::Dispatch(Msg::VisibilityChanged(Visibility::Private)),
        "submit" => ShellCommand::Submit,
        "tab" => ShellCommand::Dispatch(Msg::TabSelected(match rest {
            "scrape" => Tab::Scrape,
            "results" => Tab::Results,
            "settings" => Tab::Settings,
            _ => return Err("Usage: tab scrape|results|settings".to_string()),
        })),
        "view" => ShellCommand::Dispatch(Msg::ViewModeSelected(match rest {
            "grid" => ViewMode::Grid,
            "list" => ViewMode::List,
            "links" => ViewMode::Links,
            "table" => ViewMode::Table,
            _ => return Err("Usage: view grid|list|links|table".to_string()),
        })),
        "copy" => {
            let target = match rest.split_once(char::is_whitespace) {
                Some(("image", index)) => CopyTarget::Image(
                    index
                        .trim()
                        .parse()
                        .map_err(|_| "Usage: copy image <N>".to_string())?,
                ),
                None if rest == "tsv" => CopyTarget::Tsv,
                None if rest == "links" => CopyTarget::AllLinks,
                _ => return Err("Usage: copy tsv|links|image <N>".to_string()),
            };
            ShellCommand::Dispatch(Msg::CopyRequested(target))
        }
        "show" | "" => ShellCommand::Show,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("Unknown command `{other}`; try `help`")),
    };
    Ok(command)
}

/// Form fields being edited; becomes a `FormInput` once a URL is set.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FormDraft {
    board_url: Option<Url>,
    keyword: Option<String>,
    min_width: u32,
    min_height: u32,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            board_url: None,
            keyword: None,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
        }
    }
}

impl FormDraft {
    fn apply(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::Url(url) => self.board_url = Some(url),
            FormEdit::Keyword(keyword) => self.keyword = keyword,
            FormEdit::Size { width, height } => {
                self.min_width = width;
                self.min_height = height;
            }
        }
    }

    fn form(&self) -> Option<FormInput> {
        let board_url = self.board_url.clone()?;
        Some(FormInput {
            keyword: self.keyword.clone(),
            min_width: self.min_width,
            min_height: self.min_height,
            ..FormInput::new(board_url)
        })
    }

    fn summary(&self) -> String {
        format!(
            "Form: url={} keyword={} min={}x{}",
            self.board_url.as_ref().map_or("-", Url::as_str),
            self.keyword.as_deref().unwrap_or("-"),
            self.min_width,
            self.min_height
        )
    }
}
