//! HTTP client construction and size-capped downloads.
use futures_util::StreamExt;
use reqwest::redirect::Policy;
use url::Url;

use crate::types::{FetchError, FetchSettings};

/// Build the client used for every dataset request in a run.
///
/// The client-level `timeout` is the network timeout. It bounds each
/// request independently of the runner's deadline.
pub fn build_client(settings: &FetchSettings) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(settings.timeout)
        .connect_timeout(settings.connect_timeout)
        .user_agent(settings.user_agent.clone())
        .redirect(Policy::limited(settings.max_redirects))
        .https_only(!settings.allow_plain_http)
        .build()
        .map_err(FetchError::Client)
}

/// GET `url` and collect the body, failing on non-2xx status or when the
/// body grows past `settings.max_download_bytes`.
pub async fn download(
    client: &reqwest::Client,
    url: &Url,
    settings: &FetchSettings,
) -> Result<Vec<u8>, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::from_transport(url, settings.timeout, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.clone(),
            status,
        });
    }

    let max_bytes = settings.max_download_bytes;
    if let Some(len) = response.content_length()
        && len > max_bytes
    {
        return Err(FetchError::TooLarge {
            url: url.clone(),
            limit: max_bytes,
        });
    }

    let mut body = Vec::with_capacity(
        response
            .content_length()
            .map_or(0, |len| len.min(max_bytes) as usize),
    );
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| FetchError::from_transport(url, settings.timeout, e))?;

        if (body.len() + chunk.len()) as u64 > max_bytes {
            return Err(FetchError::TooLarge {
                url: url.clone(),
                limit: max_bytes,
            });
        }

        body.extend_from_slice(&chunk);
    }

    tracing::debug!(url = %url, bytes = body.len(), "Download complete");
    Ok(body)
}
