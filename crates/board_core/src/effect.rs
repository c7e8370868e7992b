use crate::{JobId, ScrapeRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the request to the scraping service, exactly once.
    SubmitScrape { job_id: JobId, request: ScrapeRequest },
    /// A job succeeded; the presentation should show its results.
    JobCompleted { job_id: JobId, pin_count: usize },
    /// Put this text on the clipboard.
    CopyText { text: String },
}
