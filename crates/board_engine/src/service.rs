use board_core::{ResultRecord, ScrapeFailure, ScrapeRequest};
use board_logging::{board_debug, board_info, board_warn};
use url::Url;

use crate::types::{decode_body, parse_detail, parse_pins, ScrapeRequestBody, ServiceSettings};

const SCRAPE_PATH: &str = "api/scrape";
const HEALTH_PATH: &str = "api/health";

/// The remote scraping collaborator.
#[async_trait::async_trait]
pub trait ScrapeService: Send + Sync {
    /// Issues one scrape request. No retries.
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<ResultRecord>, ScrapeFailure>;

    /// Checks that the service is up.
    async fn health(&self) -> Result<(), ScrapeFailure>;
}

#[derive(Debug, Clone)]
pub struct ReqwestScrapeService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestScrapeService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ScrapeFailure> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(map_reqwest_error)?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<Url, ScrapeFailure> {
        // Keep any path prefix of the base URL when joining.
        let mut base = self.settings.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path).map_err(|err| ScrapeFailure::Transport {
            reason: format!("invalid service url: {err}"),
        })
    }
}

#[async_trait::async_trait]
impl ScrapeService for ReqwestScrapeService {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<ResultRecord>, ScrapeFailure> {
        let endpoint = self.endpoint(SCRAPE_PATH)?;
        board_info!(
            "POST {} board_url={} keyword={:?} min={}x{}",
            endpoint,
            request.board_url(),
            request.keyword(),
            request.min_width(),
            request.min_height()
        );

        let response = self
            .client
            .post(endpoint)
            .json(&ScrapeRequestBody::from(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        board_debug!("Scrape response status={} bytes={}", status, body.len());

        let value = decode_body(&body).inspect_err(|failure| {
            board_warn!("Scrape response status={} unreadable: {}", status, failure);
        })?;
        if !status.is_success() {
            let detail = parse_detail(&value);
            board_warn!("Scrape rejected status={} detail={:?}", status, detail);
            return Err(ScrapeFailure::Service {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(parse_pins(&value))
    }

    async fn health(&self) -> Result<(), ScrapeFailure> {
        let endpoint = self.endpoint(HEALTH_PATH)?;
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.bytes().await.map_err(map_reqwest_error)?;
            Err(ScrapeFailure::Service {
                status: status.as_u16(),
                detail: decode_body(&body).ok().as_ref().and_then(parse_detail),
            })
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ScrapeFailure {
    let reason = if err.is_timeout() {
        format!("timeout: {err}")
    } else if err.is_connect() {
        format!("connect: {err}")
    } else {
        err.to_string()
    };
    ScrapeFailure::Transport { reason }
}
