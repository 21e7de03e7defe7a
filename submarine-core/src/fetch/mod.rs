//! Best-effort website enrichment ("dynamic tracking").

use thiserror::Error;
use tracing::warn;

pub mod html;
pub mod http;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteMetadata {
    pub title: Option<String>,
    pub icon: Option<Vec<u8>>,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Client(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("bad URL: {0}")]
    Url(#[from] url::ParseError),
}

pub trait MetadataSource {
    /// `Ok(None)` when there is nothing to fetch (blank URL).
    fn fetch(&self, url: &str) -> Result<Option<SiteMetadata>, FetchError>;
}

/// Never fails: any error is logged and becomes "no title, no icon".
pub fn enrich(source: &dyn MetadataSource, url: &str) -> SiteMetadata {
    match source.fetch(url) {
        Ok(Some(meta)) => meta,
        Ok(None) => SiteMetadata::default(),
        Err(e) => {
            warn!(url, error = %e, "website info unavailable");
            SiteMetadata::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl MetadataSource for Broken {
        fn fetch(&self, _url: &str) -> Result<Option<SiteMetadata>, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    struct Fixed;

    impl MetadataSource for Fixed {
        fn fetch(&self, _url: &str) -> Result<Option<SiteMetadata>, FetchError> {
            Ok(Some(SiteMetadata {
                title: Some("Fixed".into()),
                icon: Some(vec![1, 2, 3]),
            }))
        }
    }

    #[test]
    fn errors_degrade_to_empty_metadata() {
        assert_eq!(enrich(&Broken, "https://down.example"), SiteMetadata::default());
    }

    #[test]
    fn success_passes_through() {
        let meta = enrich(&Fixed, "fixed.example");
        assert_eq!(meta.title.as_deref(), Some("Fixed"));
        assert_eq!(meta.icon, Some(vec![1, 2, 3]));
    }
}
