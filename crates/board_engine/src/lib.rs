//! Board scraper engine: service I/O and effect execution.
mod clipboard;
mod controller;
mod service;
mod types;

pub use clipboard::{Clipboard, ClipboardError, Osc52Clipboard};
pub use controller::{ChannelJobSink, JobSink, SubmissionController};
pub use service::{ReqwestScrapeService, ScrapeService};
pub use types::{JobEvent, ServiceSettings, DEFAULT_SERVICE_URL};
