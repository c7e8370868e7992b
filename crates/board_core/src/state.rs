use std::time::Instant;

use crate::ack::CopyAck;
use crate::view_model::{project, AppViewModel, JobStatus, Projection, ViewMode};
use crate::{ResultRecord, ValidationError, Visibility};

pub type JobId = u64;

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Unable to reach the scraping service. Please ensure the backend is running.";
pub const SERVICE_FALLBACK_MESSAGE: &str =
    "An unexpected error occurred while scraping the board.";

/// Lifecycle of the current scrape job. Every state can be resubmitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Submitting { job_id: JobId },
    Succeeded(Vec<ResultRecord>),
    Failed(String),
}

impl JobState {
    /// Records held by the job; empty unless it succeeded.
    pub fn results(&self) -> &[ResultRecord] {
        match self {
            JobState::Succeeded(results) => results,
            _ => &[],
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, JobState::Submitting { .. })
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            JobState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn in_flight(&self) -> Option<JobId> {
        match self {
            JobState::Submitting { job_id } => Some(*job_id),
            _ => None,
        }
    }
}

/// Why a submission produced no records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeFailure {
    /// The request never got a response.
    #[error("transport error: {reason}")]
    Transport { reason: String },
    /// The service answered with a non-success status.
    #[error("service returned status {status}")]
    Service { status: u16, detail: Option<String> },
}

impl ScrapeFailure {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> &str {
        match self {
            ScrapeFailure::Transport { .. } => TRANSPORT_FAILURE_MESSAGE,
            ScrapeFailure::Service { detail, .. } => detail
                .as_deref()
                .filter(|detail| !detail.is_empty())
                .unwrap_or(SERVICE_FALLBACK_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Scrape,
    Results,
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    job: JobState,
    next_job_id: JobId,
    visibility: Visibility,
    validation_error: Option<ValidationError>,
    active_tab: Tab,
    view_mode: ViewMode,
    copy_ack: CopyAck,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(&self) -> &JobState {
        &self.job
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn can_submit(&self) -> bool {
        !self.job.is_submitting()
    }

    /// The single visible message: a rejected submission first, then a
    /// failed job.
    pub fn message(&self) -> Option<String> {
        self.validation_error
            .as_ref()
            .map(ToString::to_string)
            .or_else(|| self.job.failure_message().map(ToOwned::to_owned))
    }

    pub fn is_copy_acknowledged(&self, now: Instant) -> bool {
        self.copy_ack.is_acknowledged(now)
    }

    /// True while an acknowledgment reset is still scheduled.
    pub fn needs_tick(&self) -> bool {
        self.copy_ack.has_pending_resets()
    }

    pub fn projection(&self) -> Projection {
        project(&self.job, self.view_mode)
    }

    pub fn view(&self, now: Instant) -> AppViewModel {
        AppViewModel {
            status: JobStatus::of(&self.job),
            can_submit: self.can_submit(),
            visibility: self.visibility,
            active_tab: self.active_tab,
            view_mode: self.view_mode,
            message: self.message(),
            result_count: self.job.results().len(),
            copied: self.copy_ack.is_acknowledged(now),
            projection: self.projection(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn in_flight_job(&self) -> Option<JobId> {
        self.job.in_flight()
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.dirty = true;
        }
    }

    pub(crate) fn reject_submission(&mut self, error: ValidationError) {
        self.validation_error = Some(error);
        self.dirty = true;
    }

    /// Moves to `Submitting`, dropping previous results and messages.
    pub(crate) fn begin_submission(&mut self) -> JobId {
        self.next_job_id += 1;
        let job_id = self.next_job_id;
        self.job = JobState::Submitting { job_id };
        self.validation_error = None;
        self.dirty = true;
        job_id
    }

    pub(crate) fn complete_job(&mut self, results: Vec<ResultRecord>) {
        self.job = JobState::Succeeded(results);
        self.active_tab = Tab::Results;
        self.dirty = true;
    }

    pub(crate) fn fail_job(&mut self, message: impl Into<String>) {
        self.job = JobState::Failed(message.into());
        self.dirty = true;
    }

    pub(crate) fn select_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.dirty = true;
        }
    }

    pub(crate) fn select_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            self.view_mode = mode;
            self.dirty = true;
        }
    }

    pub(crate) fn acknowledge_copy(&mut self, completed_at: Instant) {
        self.copy_ack.arm(completed_at);
        self.dirty = true;
    }

    pub(crate) fn expire_copy_ack(&mut self, now: Instant) {
        if self.copy_ack.expire(now) {
            self.dirty = true;
        }
    }
}
