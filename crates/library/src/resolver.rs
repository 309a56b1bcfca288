//! Page resolution: `(issue id, page index) -> image bytes`.

use crate::error::LibraryResult;
use kiosk_core::IssueId;
use kiosk_database::Catalog;
use kiosk_formats::{ArchiveReader, FolderReader, PageImage, PageSource};
use log::{debug, warn};
use std::fs;

/// Resolves catalog pages to image bytes for serving.
///
/// Stateless apart from the catalog handle; calls are independent and safe
/// to run concurrently with each other and with an in-progress scan.
pub struct PageResolver {
    catalog: Catalog,
}

impl PageResolver {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Resolves one page of an issue.
    ///
    /// Returns `Ok(None)` when the issue does not exist, the index is out of
    /// range, or the underlying source cannot be read. Only catalog failures
    /// surface as errors.
    pub async fn resolve(&self, issue_id: IssueId, page_index: usize) -> LibraryResult<Option<PageImage>> {
        let issue = match self.catalog.get_issue(issue_id).await {
            Ok(issue) => issue,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Custom cover override applies to page 0 only; an unreadable
        // override falls back to the issue's own first page.
        if page_index == 0 {
            if let Some(cover) = &issue.cover {
                match fs::read(cover) {
                    Ok(bytes) => return Ok(Some(PageImage::from_path_bytes(cover, bytes))),
                    Err(e) => {
                        warn!("Failed to read cover override {}: {}", cover.display(), e);
                    }
                }
            }
        }

        // Index validity is defined by the cataloged page count; no point
        // opening the source for an index past it.
        if !issue.has_page(page_index) {
            return Ok(None);
        }

        let path = issue.file_path.as_path();
        let reader: Box<dyn PageSource> = if path.is_file() {
            Box::new(ArchiveReader::new())
        } else {
            Box::new(FolderReader::new())
        };

        match reader.read_page(path, page_index) {
            Ok(page) => Ok(page),
            Err(e) => {
                debug!(
                    "Failed to read page {} of {}: {}",
                    page_index,
                    path.display(),
                    e
                );
                Ok(None)
            }
        }
    }
}
