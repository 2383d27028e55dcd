use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use url::Url;

/// Where a startup input lives: an http(s) URL or a local file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Http(Url),
    File(PathBuf),
}

impl Endpoint {
    /// Anything that parses as an http(s) URL is fetched over the network;
    /// everything else is treated as a path.
    pub fn parse(spec: &str) -> Self {
        match Url::parse(spec) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Http(url),
            _ => Self::File(PathBuf::from(spec)),
        }
    }

    async fn fetch(&self) -> Result<String> {
        match self {
            Self::Http(url) => {
                let response = reqwest::get(url.clone())
                    .await
                    .with_context(|| format!("fetching {url}"))?;
                let response = response
                    .error_for_status()
                    .with_context(|| format!("fetching {url}"))?;
                response.text().await.with_context(|| format!("reading {url}"))
            }
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display())),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => url.fmt(f),
            Self::File(path) => path.display().fmt(f),
        }
    }
}

/// Fetch the movie dataset and the cast roster concurrently. All-or-nothing:
/// either fetch failing fails the whole startup, partial data is never
/// returned.
pub async fn fetch_inputs(dataset: &Endpoint, roster: &Endpoint) -> Result<(String, String)> {
    tokio::try_join!(dataset.fetch(), roster.fetch())
}
