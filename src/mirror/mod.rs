//! External paste mirror
//!
//! Every new paste can be re-posted to a public pastebin. The mirror
//! exposes two operations: post the paste as a form, and scrape the
//! returned page for the public URL. The network transport itself is an
//! external collaborator behind [`MirrorTransport`].

mod errors;
mod scrape;

pub use errors::{MirrorError, MirrorResult};
pub use scrape::{extract_paste_url, PasteUrlScraper};

use crate::entity::Paste;
use crate::observability::{log_event_with_fields, Event};

/// Default mirror endpoint
pub const DEFAULT_MIRROR_URL: &str = "http://pastebin.ubuntu.com/";

/// Posts url-encoded forms and returns the response body
pub trait MirrorTransport {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> MirrorResult<String>;
}

impl<T: MirrorTransport + ?Sized> MirrorTransport for Box<T> {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> MirrorResult<String> {
        (**self).post_form(url, fields)
    }
}

/// Mirror over a boxed transport
pub type DynMirror = PasteMirror<Box<dyn MirrorTransport + Send + Sync>>;

/// Publishes pastes to the mirror through a transport
pub struct PasteMirror<T: MirrorTransport> {
    endpoint: String,
    transport: T,
    scraper: PasteUrlScraper,
}

impl<T: MirrorTransport> PasteMirror<T> {
    /// Creates a mirror posting to `endpoint`
    pub fn new(endpoint: impl Into<String>, transport: T) -> MirrorResult<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            transport,
            scraper: PasteUrlScraper::new()?,
        })
    }

    /// Returns the endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts a paste and returns its public URL
    pub fn publish(&self, paste: &Paste) -> MirrorResult<String> {
        let fields = [
            ("poster", paste.poster.as_deref().unwrap_or_default()),
            ("syntax", paste.syntax.as_deref().unwrap_or_default()),
            ("content", paste.content.as_deref().unwrap_or_default()),
        ];

        let body = self.transport.post_form(&self.endpoint, &fields)?;
        let url = self.scraper.extract(&self.endpoint, &body)?;

        log_event_with_fields(
            Event::MirrorPublished,
            &[("id", &paste.id.to_string()), ("url", &url)],
        );
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeTransport {
        body: MirrorResult<String>,
        posted: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl FakeTransport {
        fn answering(body: MirrorResult<String>) -> Self {
            Self {
                body,
                posted: RefCell::new(Vec::new()),
            }
        }
    }

    impl MirrorTransport for &FakeTransport {
        fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> MirrorResult<String> {
            self.posted.borrow_mut().push((
                url.to_string(),
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ));
            self.body.clone()
        }
    }

    const PAGE: &str = r#"<a class="pturl" href="/p/Xy12AbC/plain/">Download as text</a>"#;

    #[test]
    fn test_publish_posts_form_and_scrapes() {
        let transport = FakeTransport::answering(Ok(PAGE.to_string()));
        let mirror = PasteMirror::new(DEFAULT_MIRROR_URL, &transport).unwrap();

        let url = mirror.publish(&Paste::new("doe", "go", "fmt")).unwrap();
        assert_eq!(url, "http://pastebin.ubuntu.com/p/Xy12AbC");

        let posted = transport.posted.borrow();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].0, DEFAULT_MIRROR_URL);
        assert_eq!(
            posted[0].1,
            vec![
                ("poster".to_string(), "doe".to_string()),
                ("syntax".to_string(), "go".to_string()),
                ("content".to_string(), "fmt".to_string()),
            ]
        );
    }

    #[test]
    fn test_null_fields_post_empty() {
        let transport = FakeTransport::answering(Ok(PAGE.to_string()));
        let mirror = PasteMirror::new(DEFAULT_MIRROR_URL, &transport).unwrap();

        mirror.publish(&Paste::default()).unwrap();
        let posted = transport.posted.borrow();
        assert!(posted[0].1.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_transport_error_propagates() {
        let transport = FakeTransport::answering(Err(MirrorError::Transport("refused".into())));
        let mirror = PasteMirror::new(DEFAULT_MIRROR_URL, &transport).unwrap();

        assert_eq!(
            mirror.publish(&Paste::new("a", "b", "c")),
            Err(MirrorError::Transport("refused".into()))
        );
    }

    #[test]
    fn test_page_without_link() {
        let transport = FakeTransport::answering(Ok("<html>bad syntax</html>".to_string()));
        let mirror = PasteMirror::new(DEFAULT_MIRROR_URL, &transport).unwrap();

        assert_eq!(
            mirror.publish(&Paste::new("a", "nope", "c")),
            Err(MirrorError::UrlNotFound)
        );
    }
}
