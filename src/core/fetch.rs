use crate::core::errors::{Error, Result};
use log::debug;

/*-------------------------------------------------------------------------------------------------
  Fetcher
-------------------------------------------------------------------------------------------------*/

/// Downloads a URL and returns the complete response body.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetch a URL and decode the body as UTF-8, substituting invalid sequences.
pub fn fetch_text(fetcher: &dyn Fetcher, url: &str) -> Result<String> {
    let body = fetcher.fetch(url)?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/*--------------------------------------------------------------------------------------
  HTTP Fetcher
--------------------------------------------------------------------------------------*/

/// Blocking HTTP fetcher. Uses the `reqwest` defaults for timeouts and redirects and does
/// not retry; any failure, including a non-success status, is returned as
/// [Error::Transport].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("servicetag-edl/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| Error::transport("<client>", error))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map_err(|error| Error::transport(url, error))?;
        debug!("GET {}: {} bytes", url, body.len());
        Ok(body.to_vec())
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
