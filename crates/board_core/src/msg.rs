use std::time::Instant;

use crate::{FormInput, JobId, ResultRecord, ScrapeFailure, Tab, ViewMode, Visibility};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User toggled between a public and a private board.
    VisibilityChanged(Visibility),
    /// User submitted the scrape form.
    SubmitClicked(FormInput),
    /// The service call for a job finished.
    ScrapeFinished {
        job_id: JobId,
        result: Result<Vec<ResultRecord>, ScrapeFailure>,
    },
    /// User switched navigation tab.
    TabSelected(Tab),
    /// User switched how results are displayed.
    ViewModeSelected(ViewMode),
    /// User asked to copy something from the results.
    CopyRequested(CopyTarget),
    /// Clipboard write completed.
    CopySucceeded { at: Instant },
    /// Clock tick used to expire the copy acknowledgment.
    Tick { now: Instant },
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    /// Whole result set as TSV.
    Tsv,
    /// Every record URL, one per line.
    AllLinks,
    /// Image URL of the record at this position.
    Image(usize),
}
