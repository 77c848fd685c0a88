//! Settings and error types for dataset fetching.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Canonical location of the parsed RECOIL datasets.
pub const DEFAULT_BASE_URL: &str = "https://recoil.ise.utk.edu/data/Parsed_Data/";

/// Resolved HTTP settings for one probe run.
///
/// Every field is concrete; optional configuration is resolved before it
/// reaches this type.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Directory URL the dataset file names are joined onto. Must end in `/`.
    pub base_url: Url,
    /// Network-level timeout applied by the HTTP client to each request.
    ///
    /// This is independent of the runner's deadline.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    pub max_redirects: usize,
    pub max_download_bytes: u64,
    /// Permit `http://` URLs. Only meant for local test servers.
    pub allow_plain_http: bool,
}

impl FetchSettings {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_MAX_REDIRECTS: usize = 5;
    /// 512 MiB. The adjacency pickles are large but well under this.
    pub const DEFAULT_MAX_DOWNLOAD_BYTES: u64 = 512 * 1024 * 1024;

    #[must_use]
    pub fn default_user_agent() -> String {
        format!("recoil-probe/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Default settings pointed at another base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Self::DEFAULT_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            user_agent: Self::default_user_agent(),
            max_redirects: Self::DEFAULT_MAX_REDIRECTS,
            max_download_bytes: Self::DEFAULT_MAX_DOWNLOAD_BYTES,
            allow_plain_http: false,
        }
    }
}

/// Parse a base URL, requiring an http(s) scheme and a trailing slash.
///
/// Without the trailing slash `Url::join` would replace the last path
/// segment instead of appending the file name.
pub fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|source| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: source.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if !url.path().ends_with('/') {
        return Err(FetchError::InvalidUrl {
            url: raw.to_string(),
            reason: "base URL must end with '/'".to_string(),
        });
    }
    Ok(url)
}

/// Any failure while downloading or decoding a dataset.
///
/// The runner records the `Display` text of this error verbatim.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: Url, status: StatusCode },

    #[error("network timeout after {:.1}s fetching {url}", timeout.as_secs_f64())]
    NetworkTimeout { url: Url, timeout: Duration },

    #[error("request to {url} failed: {source}")]
    Network {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} exceeds {limit} bytes")]
    TooLarge { url: Url, limit: u64 },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to decode pickle: {0}")]
    Pickle(#[from] serde_pickle::Error),

    #[error("decoder task failed: {0}")]
    DecodeTask(String),
}

impl FetchError {
    /// Classify a transport error, keeping client-side timeouts distinct.
    pub(crate) fn from_transport(url: &Url, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::NetworkTimeout {
                url: url.clone(),
                timeout,
            }
        } else {
            Self::Network {
                url: url.clone(),
                source,
            }
        }
    }
}
