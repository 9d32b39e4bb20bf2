//! Concrete page sources.
//!
//! [`TextSource`] reads plain text where pages are separated by form feeds
//! (`\x0C`), the way line printers paginate. It stands in for a real
//! PDF parser wherever a working [`PageSource`] is needed.

use crate::catalog::{PageContent, PageSource, PaginatedDocument};
use crate::error::SourceError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub const PAGE_BREAK: char = '\x0C';

/// Text of a single page, as produced by [`TextSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPage {
    pub number: u32,
    pub text: String,
}

impl TextPage {
    /// First non-blank line, used as a thumbnail caption.
    pub fn headline(&self) -> Option<&str> {
        self.text.lines().map(str::trim).find(|line| !line.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct TextSource {
    bytes: Arc<[u8]>,
}

impl TextSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into().into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(bytes))
    }
}

struct TextDocument {
    pages: Vec<Arc<TextPage>>,
}

#[async_trait]
impl PaginatedDocument for TextDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn page(&self, page_number: u32) -> Result<PageContent, SourceError> {
        let index = page_number
            .checked_sub(1)
            .ok_or_else(|| SourceError::new("pages are numbered from 1"))?;
        self.pages
            .get(index as usize)
            .map(|page| Arc::clone(page) as PageContent)
            .ok_or_else(|| SourceError::new(format!("no page {}", page_number)))
    }
}

#[async_trait]
impl PageSource for TextSource {
    async fn open(&self) -> Result<Arc<dyn PaginatedDocument>, SourceError> {
        let text = std::str::from_utf8(&self.bytes)
            .map_err(|e| SourceError::new(format!("not a text document: {}", e)))?;

        let pages = text
            .split(PAGE_BREAK)
            .enumerate()
            .map(|(i, text)| {
                Arc::new(TextPage {
                    number: i as u32 + 1,
                    text: text.to_string(),
                })
            })
            .collect();

        Ok(Arc::new(TextDocument { pages }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn splits_on_form_feed() {
        let source = TextSource::new("uno\x0Cdos\x0Ctres");
        let document = source.open().await.unwrap();
        assert_eq!(document.page_count(), 3);

        let page = document.page(2).await.unwrap();
        let page = page.downcast_ref::<TextPage>().unwrap();
        assert_eq!(page.text, "dos");
        assert_eq!(page.number, 2);
    }

    #[tokio::test]
    async fn empty_text_is_a_single_blank_page() {
        let document = TextSource::new("").open().await.unwrap();
        assert_eq!(document.page_count(), 1);
    }

    #[tokio::test]
    async fn invalid_utf8_fails_to_open() {
        let result = TextSource::new(vec![0xff, 0xfe, 0x00]).open().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn page_zero_and_past_the_end_fail() {
        let document = TextSource::new("a\x0Cb").open().await.unwrap();
        assert!(document.page(0).await.is_err());
        assert!(document.page(3).await.is_err());
    }

    #[test]
    fn headline_skips_blank_lines() {
        let page = TextPage {
            number: 1,
            text: "\n   \n  Titular del día \ncuerpo".into(),
        };
        assert_eq!(page.headline(), Some("Titular del día"));
    }
}
