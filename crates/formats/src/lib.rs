//! Page-source formats for Kiosk
//!
//! Everything that knows what an issue looks like on disk lives here: the
//! recognized image and archive extension sets, natural-order page sorting,
//! the ZIP/CBZ archive reader, the image-folder reader, and the
//! `ComicInfo.xml` metadata extractor.

mod archive;
mod comicinfo;
mod error;
mod folder;
mod format;
mod sort;

// Re-export all types
pub use archive::ArchiveReader;
pub use comicinfo::{parse_comic_info, ComicInfo, COMIC_INFO_FILE};
pub use error::{FormatError, FormatResult};
pub use folder::FolderReader;
pub use format::{ArchiveFormat, ImageFormat, PageImage};
pub use sort::natural_cmp;

use std::path::Path;

/// Contract shared by the archive and folder readers.
///
/// `read_page` with an out-of-range index is `Ok(None)`, never an error;
/// index validity is `0 <= index < page count`. A corrupt or unreadable
/// source surfaces as `Err`, which callers log and degrade from.
pub trait PageSource {
    /// Lists recognized image entries in natural order.
    ///
    /// Index 0 of the returned list is always the first page under natural
    /// ordering, independent of the source's internal storage order.
    fn list_pages(&self, path: &Path) -> FormatResult<Vec<String>>;

    /// Reads the page at `index`, returning its bytes and content type.
    fn read_page(&self, path: &Path, index: usize) -> FormatResult<Option<PageImage>>;

    /// Reads the raw bytes of a named non-page entry, e.g. `ComicInfo.xml`.
    fn read_sidecar(&self, path: &Path, name: &str) -> FormatResult<Option<Vec<u8>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_modules_compile() {
        let _ = ImageFormat::Png;
        let _ = ArchiveFormat::Cbz;
        let _ = ArchiveReader::new();
        let _ = FolderReader::new();
        assert_eq!(COMIC_INFO_FILE, "ComicInfo.xml");
    }
}
