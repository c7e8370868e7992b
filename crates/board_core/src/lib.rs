//! Board scraper core: pure job state machine, projections and export.
mod ack;
mod effect;
mod export;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use ack::{CopyAck, ACK_WINDOW};
pub use effect::Effect;
pub use export::{links_text, to_tsv, TSV_COLUMNS};
pub use model::{
    Credentials, FormInput, ResultRecord, ScrapeRequest, ValidationError, Visibility,
    DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, NOT_AVAILABLE, PLACEHOLDER_IMAGE,
    PRIVATE_BOARD_MESSAGE,
};
pub use msg::{CopyTarget, Msg};
pub use state::{
    AppState, JobId, JobState, ScrapeFailure, Tab, SERVICE_FALLBACK_MESSAGE,
    TRANSPORT_FAILURE_MESSAGE,
};
pub use update::update;
pub use view_model::{
    project, AppViewModel, Card, EmptyReason, JobStatus, LinkRow, Projection, ViewMode,
    EMPTY_IN_PROGRESS, EMPTY_NOT_SUBMITTED, EMPTY_NO_PINS,
};
