//! Document retrieval for the `url` command.
//!
//! Fetches a document over HTTP into memory, optionally with a bearer token,
//! so it can be handed to the extraction pipeline as plain bytes.

use std::time::Duration;

use reqwest::{header, Client, Request};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// A downloaded document and the content type the server declared, if any.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

pub fn build_client(timeout_secs: u64) -> Result<Client, DownloadError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(DownloadError::Client)
}

/// GET request for `url`, with `Authorization: Bearer` when a token is given.
pub fn build_request(client: &Client, url: &str, token: Option<&str>) -> reqwest::Result<Request> {
    let mut request = client.get(url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    request.build()
}

pub async fn fetch_document(
    client: &Client,
    url: &str,
    token: Option<&str>,
) -> Result<FetchedDocument, DownloadError> {
    let transport = |source| DownloadError::Transport {
        url: url.to_string(),
        source,
    };

    let request = build_request(client, url, token).map_err(transport)?;
    info!(url = %url, authorized = token.is_some(), "Downloading document");

    let response = client.execute(request).await.map_err(|e| {
        error!(error = ?e, url = %url, "Failed to fetch document");
        transport(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        error!(status = %status, url = %url, "Document download returned error status");
        return Err(DownloadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(media_type);

    let bytes = response.bytes().await.map_err(transport)?.to_vec();
    info!(url = %url, size = bytes.len(), content_type = ?content_type, "Downloaded document");
    Ok(FetchedDocument {
        bytes,
        content_type,
    })
}

/// Strips parameters such as `; charset=binary` from a content-type header.
pub fn media_type(header_value: &str) -> String {
    header_value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Last non-empty path segment of a URL, used as the file name in messages.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}
