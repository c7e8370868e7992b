use std::path::PathBuf;

use board_core::{CopyTarget, Credentials, FormInput, ViewMode, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use url::Url;

/// Scrape a Pinterest board through the board scraping service.
#[derive(Parser, Debug)]
#[command(name = "board-scraper")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (defaults to ./board-scraper.ron when present)
    #[arg(short = 'c', long, env = "BOARD_SCRAPER_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the scraping service, overriding the config file
    #[arg(long, env = "BOARD_SCRAPER_SERVICE_URL", value_name = "URL", global = true)]
    pub service_url: Option<Url>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, env = "BOARD_SCRAPER_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape one board and print the results
    Scrape(ScrapeArgs),
    /// Interactive session: edit the form, submit, switch views, copy
    Shell,
    /// Check that the scraping service is reachable
    Health,
}

#[derive(clap::Args, Debug)]
pub struct ScrapeArgs {
    /// Board URL, e.g. https://pinterest.com/username/board-name/
    pub board_url: Url,

    /// Only keep pins whose title or description mentions this keyword
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Minimum image width in pixels
    #[arg(long, default_value_t = DEFAULT_MIN_WIDTH)]
    pub min_width: u32,

    /// Minimum image height in pixels
    #[arg(long, default_value_t = DEFAULT_MIN_HEIGHT)]
    pub min_height: u32,

    /// The board is private (not supported; the request is refused locally)
    #[arg(long)]
    pub private: bool,

    /// Login email for a private board
    #[arg(long, requires = "private", requires = "password")]
    pub email: Option<String>,

    /// Login password for a private board
    #[arg(long, requires = "private", requires = "email")]
    pub password: Option<String>,

    /// How to display the results
    #[arg(long, value_enum, default_value_t = ViewArg::Grid)]
    pub view: ViewArg,

    /// Copy results to the clipboard (OSC 52) after scraping
    #[arg(long, value_enum)]
    pub copy: Option<CopyArg>,
}

impl ScrapeArgs {
    pub fn form(&self) -> FormInput {
        let credentials = match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some(Credentials {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => None,
        };
        FormInput {
            board_url: self.board_url.clone(),
            keyword: self.keyword.clone(),
            min_width: self.min_width,
            min_height: self.min_height,
            credentials,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewArg {
    Grid,
    List,
    Links,
    Table,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Grid => ViewMode::Grid,
            ViewArg::List => ViewMode::List,
            ViewArg::Links => ViewMode::Links,
            ViewArg::Table => ViewMode::Table,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyArg {
    /// Spreadsheet rows (tab-separated)
    Tsv,
    /// Every pin URL, one per line
    Links,
}

impl From<CopyArg> for CopyTarget {
    fn from(arg: CopyArg) -> Self {
        match arg {
            CopyArg::Tsv => CopyTarget::Tsv,
            CopyArg::Links => CopyTarget::AllLinks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_defaults_match_the_form() {
        let args = Args::try_parse_from(["board-scraper", "scrape", "https://pinterest.com/u/b/"])
            .unwrap();
        let Command::Scrape(scrape) = args.command else {
            panic!("expected scrape");
        };

        let form = scrape.form();
        assert_eq!(form.min_width, DEFAULT_MIN_WIDTH);
        assert_eq!(form.min_height, DEFAULT_MIN_HEIGHT);
        assert_eq!(form.keyword, None);
        assert_eq!(form.credentials, None);
        assert!(!scrape.private);
        assert_eq!(scrape.view, ViewArg::Grid);
        assert_eq!(args.log_level, LevelFilter::Warn);
    }

    #[test]
    fn board_url_must_be_a_url() {
        assert!(Args::try_parse_from(["board-scraper", "scrape", "not a url"]).is_err());
    }

    #[test]
    fn credentials_require_private() {
        assert!(Args::try_parse_from([
            "board-scraper",
            "scrape",
            "https://pinterest.com/u/b/",
            "--email",
            "me@example.com",
            "--password",
            "pw",
        ])
        .is_err());

        let args = Args::try_parse_from([
            "board-scraper",
            "scrape",
            "https://pinterest.com/u/b/",
            "--private",
            "--email",
            "me@example.com",
            "--password",
            "pw",
        ])
        .unwrap();
        let Command::Scrape(scrape) = args.command else {
            panic!("expected scrape");
        };
        assert!(scrape.form().credentials.is_some());
    }
}
