//! Paste URL extraction from the mirror's response page

use regex::Regex;

use super::errors::{MirrorError, MirrorResult};

const LINK_PATTERN: &str = r#"(?s)pturl" href="(.*?)/plain/">Download as text"#;

/// Finds the public paste path in a response page
pub struct PasteUrlScraper {
    pattern: Regex,
}

impl PasteUrlScraper {
    pub fn new() -> MirrorResult<Self> {
        let pattern = Regex::new(LINK_PATTERN).map_err(|e| MirrorError::Pattern(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// Returns `base` (without trailing slash) joined with the scraped path
    pub fn extract(&self, base: &str, body: &str) -> MirrorResult<String> {
        let path = self
            .pattern
            .captures(body)
            .and_then(|c| c.get(1))
            .ok_or(MirrorError::UrlNotFound)?;

        Ok(format!("{}{}", base.trim_end_matches('/'), path.as_str()))
    }
}

/// Scrapes the public paste URL from a response page
pub fn extract_paste_url(base: &str, body: &str) -> MirrorResult<String> {
    PasteUrlScraper::new()?.extract(base, body)
}
