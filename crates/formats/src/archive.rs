//! ZIP/CBZ archive page source

use crate::error::{FormatError, FormatResult};
use crate::format::{ImageFormat, PageImage};
use crate::sort::natural_cmp;
use crate::PageSource;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Page source backed by a ZIP-family archive.
///
/// Every call opens the archive fresh; nothing is cached between calls, so
/// readers stay stateless and safe to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveReader;

impl ArchiveReader {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, path: &Path) -> FormatResult<ZipArchive<File>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FormatError::source_not_found(path),
            _ => FormatError::read_error(path, e),
        })?;
        ZipArchive::new(file).map_err(|e| FormatError::corrupt(path, e))
    }

    /// Image entry names in natural order. Directory entries and macOS
    /// resource-fork junk are excluded.
    fn image_entries(archive: &ZipArchive<File>) -> Vec<String> {
        let mut entries: Vec<String> = archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .filter(|name| !name.contains("__MACOSX"))
            .filter(|name| ImageFormat::is_image_path(Path::new(name)))
            .map(String::from)
            .collect();

        entries.sort_by(|a, b| natural_cmp(a, b));
        entries
    }
}

impl PageSource for ArchiveReader {
    fn list_pages(&self, path: &Path) -> FormatResult<Vec<String>> {
        let archive = self.open(path)?;
        Ok(Self::image_entries(&archive))
    }

    fn read_page(&self, path: &Path, index: usize) -> FormatResult<Option<PageImage>> {
        let mut archive = self.open(path)?;
        let entries = Self::image_entries(&archive);

        let name = match entries.get(index) {
            Some(name) => name,
            None => return Ok(None),
        };

        let mut entry = archive
            .by_name(name)
            .map_err(|e| FormatError::corrupt(path, e))?;

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| FormatError::read_error(path, e))?;

        Ok(Some(PageImage::from_path_bytes(Path::new(name), bytes)))
    }

    fn read_sidecar(&self, path: &Path, name: &str) -> FormatResult<Option<Vec<u8>>> {
        let mut archive = self.open(path)?;

        let mut entry = match archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(FormatError::corrupt(path, e)),
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| FormatError::read_error(path, e))?;

        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn write_cbz(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> std::path::PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (entry_name, data) in entries {
            writer
                .start_file(*entry_name, FileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_list_pages_natural_order() {
        let dir = TempDir::new().unwrap();
        // Stored deliberately out of order.
        let cbz = write_cbz(
            dir.path(),
            "issue.cbz",
            &[
                ("page10.jpg", b"j10"),
                ("page1.jpg", b"j1"),
                ("page2.jpg", b"j2"),
            ],
        );

        let pages = ArchiveReader::new().list_pages(&cbz).unwrap();
        assert_eq!(pages, vec!["page1.jpg", "page2.jpg", "page10.jpg"]);
    }

    #[test]
    fn test_list_pages_filters_non_images() {
        let dir = TempDir::new().unwrap();
        let cbz = write_cbz(
            dir.path(),
            "issue.cbz",
            &[
                ("page1.jpg", b"j1"),
                ("ComicInfo.xml", b"<ComicInfo/>"),
                ("__MACOSX/page1.jpg", b"junk"),
                ("notes.txt", b"text"),
            ],
        );

        let pages = ArchiveReader::new().list_pages(&cbz).unwrap();
        assert_eq!(pages, vec!["page1.jpg"]);
    }

    #[test]
    fn test_read_page_by_index() {
        let dir = TempDir::new().unwrap();
        let cbz = write_cbz(
            dir.path(),
            "issue.cbz",
            &[("page2.png", b"second"), ("page1.png", b"first")],
        );

        let reader = ArchiveReader::new();
        let page = reader.read_page(&cbz, 0).unwrap().unwrap();
        assert_eq!(page.bytes, b"first");
        assert_eq!(page.content_type, "image/png");

        let page = reader.read_page(&cbz, 1).unwrap().unwrap();
        assert_eq!(page.bytes, b"second");
    }

    #[test]
    fn test_read_page_out_of_range() {
        let dir = TempDir::new().unwrap();
        let cbz = write_cbz(dir.path(), "issue.cbz", &[("page1.jpg", b"j1")]);

        let result = ArchiveReader::new().read_page(&cbz, 1).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_sidecar() {
        let dir = TempDir::new().unwrap();
        let cbz = write_cbz(
            dir.path(),
            "issue.cbz",
            &[("page1.jpg", b"j1"), ("ComicInfo.xml", b"<ComicInfo/>")],
        );

        let reader = ArchiveReader::new();
        let sidecar = reader.read_sidecar(&cbz, "ComicInfo.xml").unwrap();
        assert_eq!(sidecar.unwrap(), b"<ComicInfo/>");

        let missing = reader.read_sidecar(&cbz, "Other.xml").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_corrupt_archive_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.cbz");
        std::fs::write(&path, b"this is not a zip file").unwrap();

        let result = ArchiveReader::new().list_pages(&path);
        assert!(matches!(result, Err(FormatError::CorruptArchive { .. })));
    }

    #[test]
    fn test_missing_archive_is_an_error() {
        let result = ArchiveReader::new().list_pages(Path::new("/nonexistent/issue.cbz"));
        assert!(matches!(result, Err(FormatError::SourceNotFound { .. })));
    }
}
