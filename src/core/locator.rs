use crate::core::errors::{Error, Result};
use crate::core::fetch::{fetch_text, Fetcher};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

/*-------------------------------------------------------------------------------------------------
  Download Portal
-------------------------------------------------------------------------------------------------*/

/// Microsoft Download Center details page for "Azure IP Ranges and Service Tags - Public Cloud".
pub const DETAILS_URL: &str = "https://www.microsoft.com/en-us/download/details.aspx?id=56519";

/// Confirmation page for the same download; searched when the details page has no link.
pub const CONFIRM_URL: &str = "https://www.microsoft.com/en-us/download/confirmation.aspx?id=56519";

lazy_static! {
    // e.g. https://download.microsoft.com/download/.../ServiceTags_Public_20251117.json
    static ref SERVICE_TAGS_URL_PATTERN: Regex = Regex::new(
        r#"https://download\.microsoft\.com/download/[^"]*ServiceTags_Public_([0-9]+)\.json"#
    )
    .unwrap();
}

/*-------------------------------------------------------------------------------------------------
  Source URL
-------------------------------------------------------------------------------------------------*/

/// Location of the current Service Tags JSON document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceUrl {
    url: String,
    published: Option<NaiveDate>,
}

impl SourceUrl {
    /// Create a [SourceUrl] from a URL and its numeric date segment (`YYYYMMDD`). A segment
    /// that is not a valid date is ignored.
    pub fn new(url: &str, date_segment: Option<&str>) -> Self {
        Self {
            url: url.to_string(),
            published: date_segment
                .and_then(|segment| NaiveDate::parse_from_str(segment, "%Y%m%d").ok()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Publication date encoded in the document's file name, when present.
    pub fn published(&self) -> Option<NaiveDate> {
        self.published
    }
}

/*-------------------------------------------------------------------------------------------------
  Source Locator
-------------------------------------------------------------------------------------------------*/

/// Strategy for discovering the URL of the current Service Tags document.
pub trait SourceLocator {
    fn locate(&self, fetcher: &dyn Fetcher) -> Result<SourceUrl>;
}

/*--------------------------------------------------------------------------------------
  Portal Locator
--------------------------------------------------------------------------------------*/

/// Scrapes download portal pages, in order, for the first link matching a pattern. The
/// first capture group of the pattern, when present, is the document's date segment.
#[derive(Clone, Debug)]
pub struct PortalLocator {
    pages: Vec<String>,
    pattern: Regex,
}

impl Default for PortalLocator {
    /// Search the details page, then the confirmation page, for a
    /// `ServiceTags_Public_<date>.json` link.
    fn default() -> Self {
        Self {
            pages: vec![DETAILS_URL.to_string(), CONFIRM_URL.to_string()],
            pattern: SERVICE_TAGS_URL_PATTERN.clone(),
        }
    }
}

impl PortalLocator {
    /// Replace the pages searched for the download link.
    pub fn with_pages<I, S>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pages = pages.into_iter().map(|page| page.as_ref().to_string()).collect();
        self
    }

    /// Replace the pattern used to find the download link.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Find the first matching link in an HTML page.
    pub fn find_url(&self, html: &str) -> Option<SourceUrl> {
        self.pattern.captures(html).map(|captures| {
            let date_segment = captures.get(1).map(|segment| segment.as_str());
            SourceUrl::new(&captures[0], date_segment)
        })
    }
}

impl SourceLocator for PortalLocator {
    fn locate(&self, fetcher: &dyn Fetcher) -> Result<SourceUrl> {
        for page in &self.pages {
            debug!("Searching {} for the ServiceTags JSON URL", page);
            let html = fetch_text(fetcher, page)?;
            if let Some(source) = self.find_url(&html) {
                match source.published() {
                    Some(published) => info!(
                        "Found ServiceTags JSON URL: {} (published {})",
                        source.url(),
                        published
                    ),
                    None => info!("Found ServiceTags JSON URL: {}", source.url()),
                }
                return Ok(source);
            }
        }

        Err(Error::ResourceNotFound(format!(
            "could not find a ServiceTags_Public JSON URL on: {}",
            self.pages.join(", ")
        )))
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
