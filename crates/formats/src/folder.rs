//! Image-folder page source

use crate::error::{FormatError, FormatResult};
use crate::format::{ImageFormat, PageImage};
use crate::sort::natural_cmp;
use crate::PageSource;
use std::fs;
use std::io;
use std::path::Path;

/// Page source backed by a plain directory of image files.
///
/// Listing is non-recursive: only direct children count as pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderReader;

impl FolderReader {
    pub fn new() -> Self {
        Self
    }

    fn image_files(path: &Path) -> FormatResult<Vec<String>> {
        let dir = fs::read_dir(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FormatError::source_not_found(path),
            _ => FormatError::read_error(path, e),
        })?;

        let mut names = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| FormatError::read_error(path, e))?;
            let entry_path = entry.path();
            if !entry_path.is_file() {
                continue;
            }
            if !ImageFormat::is_image_path(&entry_path) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort_by(|a, b| natural_cmp(a, b));
        Ok(names)
    }

    /// Number of recognized images directly inside `path`; the "does this
    /// directory look like an issue" heuristic. Unreadable directories
    /// count as zero.
    pub fn image_count(&self, path: &Path) -> usize {
        Self::image_files(path).map(|v| v.len()).unwrap_or(0)
    }
}

impl PageSource for FolderReader {
    fn list_pages(&self, path: &Path) -> FormatResult<Vec<String>> {
        Self::image_files(path)
    }

    fn read_page(&self, path: &Path, index: usize) -> FormatResult<Option<PageImage>> {
        let names = Self::image_files(path)?;

        let name = match names.get(index) {
            Some(name) => name,
            None => return Ok(None),
        };

        let full_path = path.join(name);
        let bytes =
            fs::read(&full_path).map_err(|e| FormatError::read_error(&full_path, e))?;

        Ok(Some(PageImage::from_path_bytes(&full_path, bytes)))
    }

    fn read_sidecar(&self, path: &Path, name: &str) -> FormatResult<Option<Vec<u8>>> {
        let sidecar_path = path.join(name);
        match fs::read(&sidecar_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FormatError::read_error(&sidecar_path, e)),
        }
    }
}
