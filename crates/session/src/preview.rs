//! Page counter of the split-pane PDF preview.

use crate::error::PreviewError;

/// 1-based current page, always within `1..=page_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePreview {
    page: u32,
    page_count: u32,
}

impl PagePreview {
    /// Start on page 1. A reported count of 0 is treated as a single page.
    pub fn new(page_count: u32) -> Self {
        Self {
            page: 1,
            page_count: page_count.max(1),
        }
    }

    /// Count the pages of an in-memory PDF.
    ///
    /// # Errors
    /// Returns `PreviewError` if the bytes are not a readable PDF or it has no pages.
    pub fn from_pdf_bytes(bytes: &[u8]) -> Result<Self, PreviewError> {
        let document = lopdf::Document::load_mem(bytes)?;
        let pages = u32::try_from(document.get_pages().len()).unwrap_or(u32::MAX);
        if pages == 0 {
            return Err(PreviewError::NoPages);
        }
        Ok(Self::new(pages))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn next(&mut self) -> u32 {
        self.go_to(self.page.saturating_add(1))
    }

    pub fn previous(&mut self) -> u32 {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Jump to `page`, clamped into range. Returns the page actually shown.
    pub fn go_to(&mut self, page: u32) -> u32 {
        self.page = page.clamp(1, self.page_count);
        self.page
    }

    /// Adopt a newly reported page count, keeping the current page if it still exists.
    pub fn set_page_count(&mut self, page_count: u32) {
        self.page_count = page_count.max(1);
        self.page = self.page.min(self.page_count);
    }
}
