use crate::export::to_tsv;
use crate::{JobState, ResultRecord, Tab, Visibility};

pub const EMPTY_NOT_SUBMITTED: &str = "Start scraping to see your Pinterest board results here!";
pub const EMPTY_IN_PROGRESS: &str = "Scraping in progress...";
pub const EMPTY_NO_PINS: &str = "The board returned no pins matching your filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Links,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn of(job: &JobState) -> Self {
        match job {
            JobState::Idle => JobStatus::Idle,
            JobState::Submitting { .. } => JobStatus::Submitting,
            JobState::Succeeded(_) => JobStatus::Succeeded,
            JobState::Failed(_) => JobStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NotSubmitted,
    InProgress,
    NoPins,
}

impl EmptyReason {
    pub fn message(self) -> &'static str {
        match self {
            EmptyReason::NotSubmitted => EMPTY_NOT_SUBMITTED,
            EmptyReason::InProgress => EMPTY_IN_PROGRESS,
            EmptyReason::NoPins => EMPTY_NO_PINS,
        }
    }
}

/// One visual card in the grid or list projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub key: String,
    pub title: String,
    pub image: String,
    pub link: Option<String>,
    pub description: String,
    pub dimensions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub key: String,
    pub label: String,
    pub target: Option<String>,
}

/// What the results area shows for a job state and view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Error { message: String },
    Empty { reason: EmptyReason },
    Grid { count: usize, cards: Vec<Card> },
    List { count: usize, cards: Vec<Card> },
    Links { count: usize, links: Vec<LinkRow> },
    Table { count: usize, text: String },
}

/// Maps the job state onto the active view mode. Pure read; never mutates.
pub fn project(job: &JobState, mode: ViewMode) -> Projection {
    let results = match job {
        JobState::Failed(message) => {
            return Projection::Error {
                message: message.clone(),
            }
        }
        JobState::Idle => {
            return Projection::Empty {
                reason: EmptyReason::NotSubmitted,
            }
        }
        JobState::Submitting { .. } => {
            return Projection::Empty {
                reason: EmptyReason::InProgress,
            }
        }
        JobState::Succeeded(results) if results.is_empty() => {
            return Projection::Empty {
                reason: EmptyReason::NoPins,
            }
        }
        JobState::Succeeded(results) => results,
    };

    let count = results.len();
    match mode {
        ViewMode::Grid => Projection::Grid {
            count,
            cards: cards(results),
        },
        ViewMode::List => Projection::List {
            count,
            cards: cards(results),
        },
        ViewMode::Links => Projection::Links {
            count,
            links: results
                .iter()
                .enumerate()
                .map(|(index, record)| LinkRow {
                    key: record.display_key(index),
                    label: record.title_or_na().to_string(),
                    target: record.link_target().map(ToOwned::to_owned),
                })
                .collect(),
        },
        ViewMode::Table => Projection::Table {
            count,
            text: to_tsv(results),
        },
    }
}

fn cards(results: &[ResultRecord]) -> Vec<Card> {
    results
        .iter()
        .enumerate()
        .map(|(index, record)| Card {
            key: record.display_key(index),
            title: record.title_or_na().to_string(),
            image: record.image_or_placeholder().to_string(),
            link: record.link_target().map(ToOwned::to_owned),
            description: record.description_or_na().to_string(),
            dimensions: match (record.width, record.height) {
                (Some(width), Some(height)) => Some(format!("{width}x{height}")),
                _ => None,
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub status: JobStatus,
    pub can_submit: bool,
    pub visibility: Visibility,
    pub active_tab: Tab,
    pub view_mode: ViewMode,
    pub message: Option<String>,
    pub result_count: usize,
    pub copied: bool,
    pub projection: Projection,
    pub dirty: bool,
}
