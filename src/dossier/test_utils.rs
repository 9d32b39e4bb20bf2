use crate::catalog::{PageContent, PageSource, PaginatedDocument};
use crate::error::SourceError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Content produced by [`FakeSource`] pages: just the page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakePage(pub u32);

/// A scripted page source that counts how often it is opened.
#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    pages: u32,
    open_error: Option<String>,
    failing_page: Option<u32>,
    yields: usize,
    opens: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn with_pages(pages: u32) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            open_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Makes `page(n)` fail for the given page.
    pub fn failing_page(mut self, page: u32) -> Self {
        self.failing_page = Some(page);
        self
    }

    /// Suspends `yields` times while opening, so that concurrent callers
    /// overlap.
    pub fn yielding(mut self, yields: usize) -> Self {
        self.yields = yields;
        self
    }

    pub fn open_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.opens)
    }
}

struct FakeDocument {
    pages: u32,
    failing_page: Option<u32>,
}

#[async_trait]
impl PaginatedDocument for FakeDocument {
    fn page_count(&self) -> u32 {
        self.pages
    }

    async fn page(&self, page_number: u32) -> Result<PageContent, SourceError> {
        if self.failing_page == Some(page_number) {
            return Err(SourceError::new(format!("page {} is corrupt", page_number)));
        }
        Ok(Arc::new(FakePage(page_number)))
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn open(&self) -> Result<Arc<dyn PaginatedDocument>, SourceError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }
        if let Some(message) = &self.open_error {
            return Err(SourceError::new(message.clone()));
        }
        Ok(Arc::new(FakeDocument {
            pages: self.pages,
            failing_page: self.failing_page,
        }))
    }
}
