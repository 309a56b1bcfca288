//! Recognized image and archive formats
//!
//! Both extension sets are fixed configuration constants of the catalog,
//! not user-configurable.

use std::path::Path;

/// Recognized page-image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// JPEG (.jpg / .jpeg)
    Jpeg,
    /// PNG
    Png,
    /// WebP
    Webp,
    /// GIF
    Gif,
}

impl ImageFormat {
    /// Detects format from file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Detects format from a file path or archive entry name
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Returns true if the path names a recognized image
    pub fn is_image_path(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

/// Recognized issue archive formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// Plain ZIP
    Zip,
    /// Comic Book ZIP
    Cbz,
}

impl ArchiveFormat {
    /// Detects format from file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "zip" => Some(Self::Zip),
            "cbz" => Some(Self::Cbz),
            _ => None,
        }
    }

    /// Detects format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns true if the path names a recognized archive
    pub fn is_archive_path(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

/// One resolved page image: raw bytes plus their MIME content type.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl PageImage {
    /// Wraps bytes read from `path`, deriving the content type from its
    /// extension. Unrecognized extensions fall back to a generic type.
    pub fn from_path_bytes(path: &Path, bytes: Vec<u8>) -> Self {
        let content_type = ImageFormat::from_path(path)
            .map(|f| f.mime_type())
            .unwrap_or("application/octet-stream");
        Self {
            bytes,
            content_type,
        }
    }
}
