use std::time::Duration;

use comic_core::{Comic, FailureKind, FetchError, JobId};
use futures_util::StreamExt;

pub const DEFAULT_BASE_URL: &str = "https://xkcd.com";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(5 * 60),
            max_bytes: 1024 * 1024,
        }
    }
}

/// Retrieves the metadata of a single comic.
///
/// Implementations enforce their own per-request timeout. A non-success
/// response status must be reported as [`FailureKind::HttpStatus`] so the
/// pipeline can tell "no comic here" apart from a failed request.
#[async_trait::async_trait]
pub trait ComicFetcher: Send + Sync {
    async fn fetch(&self, id: JobId) -> Result<Comic, FetchError>;
}

/// Fetches `{base_url}/{id}/info.0.json` over a shared keep-alive client.
#[derive(Debug, Clone)]
pub struct ReqwestComicFetcher {
    client: reqwest::Client,
    base_url: reqwest::Url,
    max_bytes: u64,
}

impl ReqwestComicFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let base_url = reqwest::Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be a base url", settings.base_url),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            max_bytes: settings.max_bytes,
        })
    }

    pub fn comic_url(&self, id: JobId) -> reqwest::Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&id.to_string())
                .push("info.0.json");
        }
        url
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, actual: Option<u64>) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl ComicFetcher for ReqwestComicFetcher {
    async fn fetch(&self, id: JobId) -> Result<Comic, FetchError> {
        let url = self.comic_url(id);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = self.read_body(response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
