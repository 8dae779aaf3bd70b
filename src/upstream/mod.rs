use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Upstream answered with status: {0}")]
    StatusError(reqwest::StatusCode),

    #[error("Invalid upstream URL '{0}'")]
    InvalidUrl(String),
}

/// Client for the remote image-by-code service used on cache misses.
pub struct UpstreamClient {
    base_url: reqwest::Url,
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout: Option<u64>) -> Result<Self, UpstreamError> {
        let client_builder = reqwest::Client::builder();

        // No deadline unless one is configured
        let client_builder = match timeout {
            Some(secs) => client_builder.timeout(Duration::from_secs(secs)),
            None => client_builder,
        };

        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url: parsed,
            client: client_builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// The code is appended as a single percent-encoded path segment.
    pub fn image_url(&self, code: &str) -> reqwest::Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can take path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(code);
        }
        url
    }

    // Fetch the image for a code
    pub async fn fetch_image(&self, code: &str) -> Result<Vec<u8>, UpstreamError> {
        self.make_request(self.image_url(code)).await
    }

    async fn make_request(&self, url: reqwest::Url) -> Result<Vec<u8>, UpstreamError> {
        match self.client.get(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    log::warn!("Upstream request to {} failed with status: {}", url, status);
                    return Err(UpstreamError::StatusError(status));
                }

                match response.bytes().await {
                    Ok(bytes) => Ok(bytes.to_vec()),
                    Err(e) => Err(UpstreamError::NetworkError(e)),
                }
            }
            Err(e) => {
                log::warn!("Upstream request to {} failed: {}", url, e);
                Err(UpstreamError::NetworkError(e))
            }
        }
    }
}
