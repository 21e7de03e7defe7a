use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, warn};
use url::Url;

use super::html::{extract_title, icon_candidates, pick_largest};
use super::{FetchError, MetadataSource, SiteMetadata};
use crate::domain::normalize_website;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Applied to the page request and the icon request separately.
    pub timeout: Duration,
    pub discover_icons: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            discover_icons: true,
        }
    }
}

#[derive(Debug)]
pub struct HttpFetcher {
    http: Client,
    discover_icons: bool,
}

impl HttpFetcher {
    pub fn new(opts: FetchOptions) -> Result<HttpFetcher, FetchError> {
        let http = match Client::builder()
            .timeout(opts.timeout)
            .user_agent(concat!("submarine/", env!("CARGO_PKG_VERSION")))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                return Err(FetchError::Client(e));
            }
        };

        Ok(HttpFetcher {
            http,
            discover_icons: opts.discover_icons,
        })
    }

    fn fetch_icon(&self, page_url: &Url, html: &str) -> Option<Vec<u8>> {
        let candidates = icon_candidates(html, page_url);
        let best = pick_largest(&candidates)?;
        debug!(url = %best.url, width = ?best.width, "fetching icon");
        match self.http.get(best.url.clone()).send() {
            Ok(resp) if resp.status() == StatusCode::OK => match resp.bytes() {
                Ok(bytes) if !bytes.is_empty() => Some(bytes.to_vec()),
                Ok(_) => None,
                Err(e) => {
                    warn!(url = %best.url, error = %e, "icon body unreadable");
                    None
                }
            },
            Ok(resp) => {
                debug!(url = %best.url, status = resp.status().as_u16(), "icon not available");
                None
            }
            Err(e) => {
                warn!(url = %best.url, error = %e, "icon request failed");
                None
            }
        }
    }
}

impl MetadataSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Option<SiteMetadata>, FetchError> {
        let Some(url) = normalize_website(url) else {
            return Ok(None);
        };
        let target = Url::parse(&url)?;
        let resp = self.http.get(target).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let page_url = resp.url().clone();
        let body = resp.text()?;

        let title = extract_title(&body);
        let icon = if self.discover_icons {
            self.fetch_icon(&page_url, &body)
        } else {
            None
        };
        debug!(%page_url, ?title, icon_bytes = icon.as_ref().map(Vec::len), "fetched website info");
        Ok(Some(SiteMetadata { title, icon }))
    }
}
