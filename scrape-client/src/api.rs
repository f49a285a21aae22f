use crate::ScrapeBackend;
use moodscope_core::{AppConfig, CoreError, ScrapeRequest};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use url::Url;

const USER_AGENT: &str = concat!("moodscope/", env!("CARGO_PKG_VERSION"));

/// Message reported for any non-2xx answer from the scraping service.
pub const NOT_OK_MESSAGE: &str = "Network response was not ok";

/// HTTP client for the scraping service's `POST /scrape_comments`.
#[derive(Debug, Clone)]
pub struct ScrapeClient {
    http_client: Client,
    endpoint: Url,
    connect_timeout: Duration,
}

impl ScrapeClient {
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let endpoint = config.scrape_endpoint()?;
        Self::with_endpoint(endpoint, Duration::from_secs(config.connect_timeout_secs))
    }

    /// Only connecting is time-limited. Once connected the request waits for
    /// the backend's answer however long the scrape takes.
    pub fn with_endpoint(endpoint: Url, connect_timeout: Duration) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            endpoint,
            connect_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends the raw inputs to the backend. Any 2xx is success; the body is
    /// left unread.
    pub async fn scrape_comments(&self, request: &ScrapeRequest) -> Result<StatusCode, CoreError> {
        let start_time = Instant::now();
        info!(
            "Requesting scrape: POST {} subreddits='{}' numPosts='{}'",
            self.endpoint, request.subreddits, request.num_posts
        );

        let response = match self
            .http_client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for POST {}: {}", self.endpoint, e);
                if e.is_timeout() {
                    return Err(CoreError::Timeout {
                        seconds: self.connect_timeout.as_secs(),
                    });
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(
                "Scrape request failed with status: {} after {:?}",
                status,
                start_time.elapsed()
            );
            return Err(CoreError::RequestFailed {
                message: NOT_OK_MESSAGE.to_string(),
                status_code: Some(status.as_u16()),
            });
        }

        debug!(
            "Scrape request accepted: {} after {:?}",
            status,
            start_time.elapsed()
        );
        Ok(status)
    }
}

impl ScrapeBackend for ScrapeClient {
    fn submit(
        &self,
        request: ScrapeRequest,
    ) -> impl Future<Output = Result<(), CoreError>> + Send {
        async move {
            self.scrape_comments(&request).await?;
            Ok(())
        }
    }
}
