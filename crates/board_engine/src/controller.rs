use std::collections::VecDeque;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use board_core::{update, AppState, AppViewModel, Effect, JobId, JobState, JobStatus, Msg};
use board_logging::{board_error, board_info, board_warn};

use crate::clipboard::Clipboard;
use crate::service::ScrapeService;
use crate::JobEvent;

/// Receives job status changes as they happen.
pub trait JobSink: Send + Sync {
    fn emit(&self, event: JobEvent);
}

pub struct ChannelJobSink {
    tx: mpsc::Sender<JobEvent>,
}

impl ChannelJobSink {
    pub fn new(tx: mpsc::Sender<JobEvent>) -> Self {
        Self { tx }
    }
}

impl JobSink for ChannelJobSink {
    fn emit(&self, event: JobEvent) {
        let _ = self.tx.send(event);
    }
}

struct NullJobSink;

impl JobSink for NullJobSink {
    fn emit(&self, _event: JobEvent) {}
}

/// Single writer of the application state.
///
/// Runs messages through `update`, performs the scrape requests it asks for
/// and hands every other effect back to the caller. Readers get `&AppState`.
pub struct SubmissionController {
    state: AppState,
    service: Arc<dyn ScrapeService>,
    sink: Arc<dyn JobSink>,
}

impl SubmissionController {
    pub fn new(service: Arc<dyn ScrapeService>) -> Self {
        Self {
            state: AppState::new(),
            service,
            sink: Arc::new(NullJobSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn JobSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self, now: Instant) -> AppViewModel {
        self.state.view(now)
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// Applies a message and everything it triggers.
    ///
    /// A scrape request is awaited in place, so the controller cannot accept
    /// another message until the job has finished. Returns the effects the
    /// caller must handle (`JobCompleted`, `CopyText`).
    pub async fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let mut inbox = VecDeque::from([msg]);
        let mut outbox = Vec::new();

        while let Some(msg) = inbox.pop_front() {
            for effect in self.apply(msg) {
                match effect {
                    Effect::SubmitScrape { job_id, request } => {
                        board_info!("SubmitScrape job_id={} board_url={}", job_id, request.board_url());
                        let result = self.service.scrape(&request).await;
                        match &result {
                            Ok(results) => {
                                board_info!("Job {} returned {} pins", job_id, results.len())
                            }
                            Err(failure) => board_warn!("Job {} failed: {}", job_id, failure),
                        }
                        inbox.push_back(Msg::ScrapeFinished { job_id, result });
                    }
                    other => outbox.push(other),
                }
            }
        }

        outbox
    }

    /// Writes `text` to the clipboard and raises the acknowledgment on success.
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn copy(&mut self, text: &str, clipboard: &dyn Clipboard) -> bool {
        match clipboard.set_text(text) {
            Ok(()) => {
                self.apply(Msg::CopySucceeded { at: Instant::now() });
                true
            }
            Err(err) => {
                board_error!("Failed to copy: {}", err);
                false
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.apply(Msg::Tick { now });
    }

    fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        let before = JobStatus::of(self.state.job());
        let previous_job = in_flight(self.state.job());
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let status = JobStatus::of(self.state.job());
        if status != before {
            let job_id = in_flight(self.state.job()).or(previous_job);
            board_info!("Job status {:?} -> {:?}", before, status);
            self.sink.emit(JobEvent::StatusChanged { job_id, status });
        }
        effects
    }
}

fn in_flight(job: &JobState) -> Option<JobId> {
    match job {
        JobState::Submitting { job_id } => Some(*job_id),
        _ => None,
    }
}
