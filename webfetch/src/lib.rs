//! Dataset downloads for recoil-probe.
//!
//! This crate fetches the remote RECOIL dataset files and decodes them so
//! that a probe measures the full cost a notebook user would pay: transfer
//! plus deserialization.
//!
//! # Pipeline
//!
//! 1. **URL** - the file name is joined onto the configured base URL
//! 2. **Download** - HTTP GET with a network timeout, non-2xx rejected,
//!    body streamed under a byte cap
//! 3. **Decode** - CSV into a [`Table`], pickle into a generic value, on the
//!    blocking pool so a large decode does not stall the runtime
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Settings and the [`FetchError`] enum |
//! | [`http`] | Client construction and size-capped download |
//! | [`payload`] | CSV and pickle decoding |
//! | `opcodes` | Pickle opcode walk for streams with no generic value form |
//!
//! # Usage
//!
//! ```ignore
//! use probe_webfetch::{Fetcher, FetchSettings};
//! use probe_types::PayloadFormat;
//!
//! let fetcher = Fetcher::new(FetchSettings::default())?;
//! let payload = fetcher.load("demand.pickle", PayloadFormat::Pickle).await?;
//! println!("{}", payload.describe());
//! ```

mod http;
mod opcodes;
mod payload;
mod types;

use probe_types::PayloadFormat;
use tokio::task::JoinHandle;
use url::Url;

pub use payload::{Payload, Table, decode_csv, decode_pickle};
pub use types::{DEFAULT_BASE_URL, FetchError, FetchSettings, parse_base_url};

/// Downloads and decodes dataset files relative to one base URL.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl Fetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = http::build_client(&settings)?;
        Ok(Self { client, settings })
    }

    /// Absolute URL of a dataset file.
    pub fn url_for(&self, file_name: &str) -> Result<Url, FetchError> {
        self.settings
            .base_url
            .join(file_name)
            .map_err(|e| FetchError::InvalidUrl {
                url: format!("{}{file_name}", self.settings.base_url),
                reason: e.to_string(),
            })
    }

    /// Download a file without decoding it.
    pub async fn fetch_bytes(&self, file_name: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(file_name)?;
        http::download(&self.client, &url, &self.settings).await
    }

    /// Download a file and decode it according to `format`.
    pub async fn load(&self, file_name: &str, format: PayloadFormat) -> Result<Payload, FetchError> {
        let body = self.fetch_bytes(file_name).await?;

        let bytes = body.len();
        let payload = DecodeTask::spawn(file_name, bytes, move || decode(&body, format))
            .join()
            .await?;

        tracing::debug!(
            file = file_name,
            format = format.as_str(),
            shape = %payload.describe(),
            "Decoded payload"
        );
        Ok(payload)
    }
}

/// A decode running on the blocking pool.
///
/// Blocking work cannot be cancelled. If the caller stops waiting (the
/// deadline fired), the decode runs on until it finishes and still holds the
/// body until then. Dropping an unfinished task records that in the log.
struct DecodeTask {
    handle: JoinHandle<Result<Payload, FetchError>>,
    file: String,
    bytes: usize,
    joined: bool,
}

impl DecodeTask {
    fn spawn<F>(file: &str, bytes: usize, work: F) -> Self
    where
        F: FnOnce() -> Result<Payload, FetchError> + Send + 'static,
    {
        Self {
            handle: tokio::task::spawn_blocking(work),
            file: file.to_string(),
            bytes,
            joined: false,
        }
    }

    fn is_abandoned(&self) -> bool {
        !self.joined && !self.handle.is_finished()
    }

    async fn join(mut self) -> Result<Payload, FetchError> {
        let result = (&mut self.handle).await;
        self.joined = true;
        result.map_err(|e| FetchError::DecodeTask(e.to_string()))?
    }
}

impl Drop for DecodeTask {
    fn drop(&mut self) {
        if self.is_abandoned() {
            tracing::debug!(
                file = %self.file,
                bytes = self.bytes,
                "Decode abandoned mid-run, left to finish on the blocking pool"
            );
        }
    }
}

fn decode(body: &[u8], format: PayloadFormat) -> Result<Payload, FetchError> {
    match format {
        PayloadFormat::Csv => decode_csv(body).map(Payload::Table),
        PayloadFormat::Pickle => decode_pickle(body),
    }
}
