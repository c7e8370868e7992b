use board_core::{AppViewModel, Card, JobStatus, LinkRow, Projection, Tab, Visibility};

/// Renders the active tab as terminal text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    out.push_str(&status_line(view));
    out.push('\n');

    if let Some(message) = banner(view) {
        out.push_str(&format!("!! {message}\n"));
    }

    match view.active_tab {
        Tab::Scrape => {}
        Tab::Results => {
            out.push('\n');
            out.push_str(&render_projection(&view.projection));
        }
        Tab::Settings => {
            out.push_str("\nSettings are edited in board-scraper.ron and are not saved from here.\n");
        }
    }
    out
}

pub fn status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Idle => "Idle",
        JobStatus::Submitting => "Scraping...",
        JobStatus::Succeeded => "Done",
        JobStatus::Failed => "Failed",
    }
}

pub fn status_line(view: &AppViewModel) -> String {
    let status = status_label(view.status);
    let visibility = match view.visibility {
        Visibility::Public => "public",
        Visibility::Private => "private",
    };
    let mut line = format!(
        "Status: {} | Board: {} | Tab: {:?} | View: {:?} | Pins: {}",
        status, visibility, view.active_tab, view.view_mode, view.result_count
    );
    if view.copied {
        line.push_str(" | COPIED!");
    }
    line
}

// The error view already carries a failure message; only a rejected
// submission needs a separate banner there.
fn banner(view: &AppViewModel) -> Option<&str> {
    let message = view.message.as_deref()?;
    match (&view.projection, view.active_tab) {
        (Projection::Error { message: shown }, Tab::Results) if shown == message => None,
        _ => Some(message),
    }
}

pub fn render_projection(projection: &Projection) -> String {
    match projection {
        Projection::Error { message } => format!("SCRAPING ISSUE\n{message}\n"),
        Projection::Empty { reason } => format!("NO RESULTS\n{}\n", reason.message()),
        Projection::Grid { count, cards } => {
            let mut out = pins_found(*count);
            for card in cards {
                out.push_str(&grid_card(card));
            }
            out
        }
        Projection::List { count, cards } => {
            let mut out = pins_found(*count);
            for card in cards {
                out.push_str(&list_row(card));
            }
            out
        }
        Projection::Links { count, links } => {
            let mut out = pins_found(*count);
            for link in links {
                out.push_str(&link_row(link));
            }
            out
        }
        Projection::Table { text, .. } => format!("{text}\n"),
    }
}

fn pins_found(count: usize) -> String {
    format!("{count} PINS FOUND\n\n")
}

fn grid_card(card: &Card) -> String {
    let mut out = format!("[{}] {}", card.key, card.title);
    if let Some(dimensions) = &card.dimensions {
        out.push_str(&format!(" ({dimensions})"));
    }
    out.push('\n');
    out.push_str(&format!("    image: {}\n", card.image));
    if let Some(link) = &card.link {
        out.push_str(&format!("    link:  {link}\n"));
    }
    out.push_str(&format!("    {}\n\n", card.description));
    out
}

fn list_row(card: &Card) -> String {
    format!(
        "{:>4}  {}  {}  {}\n",
        card.key,
        card.title,
        card.link.as_deref().unwrap_or("-"),
        card.image
    )
}

fn link_row(link: &LinkRow) -> String {
    match &link.target {
        Some(target) => format!("{} -> {}\n", link.label, target),
        None => format!("{} (no link)\n", link.label),
    }
}
