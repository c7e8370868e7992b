use std::time::Duration;

use board_core::{JobId, JobStatus, ResultRecord, ScrapeFailure, ScrapeRequest};
use board_logging::board_warn;
use serde::Serialize;
use serde_json::Value;
use url::Url;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000/";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_SERVICE_URL).expect("default service url"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Progress of a job as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    StatusChanged { job_id: Option<JobId>, status: JobStatus },
}

/// JSON body posted to the scrape endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ScrapeRequestBody<'a> {
    board_url: &'a str,
    keyword: Option<&'a str>,
    min_width: u32,
    min_height: u32,
    is_public: bool,
    email: Option<&'a str>,
    password: Option<&'a str>,
}

impl<'a> From<&'a ScrapeRequest> for ScrapeRequestBody<'a> {
    fn from(request: &'a ScrapeRequest) -> Self {
        Self {
            board_url: request.board_url().as_str(),
            keyword: request.keyword(),
            min_width: request.min_width(),
            min_height: request.min_height(),
            is_public: request.is_public(),
            // Credentials are collected by the form but never sent.
            email: None,
            password: None,
        }
    }
}

/// Decodes a response body. A body that is not JSON means something other
/// than the scraping service answered, so it counts as a transport failure.
pub(crate) fn decode_body(body: &[u8]) -> Result<Value, ScrapeFailure> {
    serde_json::from_slice(body).map_err(|err| ScrapeFailure::Transport {
        reason: format!("response body is not JSON: {err}"),
    })
}

/// Reads the `pins` array of a success body. Anything that is not an array
/// of record-shaped objects yields fewer (or zero) records, never an error.
pub(crate) fn parse_pins(value: &Value) -> Vec<ResultRecord> {
    match value.get("pins") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                match serde_json::from_value::<ResultRecord>(item.clone()) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        board_warn!("Dropping malformed pin at index {}: {}", index, err);
                        None
                    }
                }
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            board_warn!("`pins` is not an array ({}), treating as empty", type_name(other));
            Vec::new()
        }
    }
}

/// The `detail` string of a failure body, if there is one.
pub(crate) fn parse_detail(value: &Value) -> Option<String> {
    value
        .get("detail")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
