//! Kiosk Library Management
//!
//! High-level orchestration layer that coordinates core, database, and
//! formats. Provides the library scanner, page resolver, and management
//! facade for the magazine catalog.

pub mod error;
pub mod filename;
pub mod manager;
pub mod resolver;
pub mod scanner;

pub use error::{LibraryError, LibraryResult};
pub use filename::{parse_filename, FilenameGuess};
pub use manager::{LibraryManager, LibraryStats};
pub use resolver::PageResolver;
pub use scanner::{LibraryScanner, ScanSummary};

/// Library configuration
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Database file path
    pub database_path: String,
    /// Root directory of the magazine library
    pub library_root: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            database_path: "kiosk.db".to_string(),
            library_root: "library".to_string(),
        }
    }
}

impl LibraryConfig {
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Default::default()
        }
    }

    pub fn with_library_root(mut self, path: impl Into<String>) -> Self {
        self.library_root = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LibraryConfig::default();
        assert_eq!(config.database_path, "kiosk.db");
        assert_eq!(config.library_root, "library");
    }

    #[test]
    fn test_config_builder() {
        let config = LibraryConfig::new("custom.db").with_library_root("/magazines");

        assert_eq!(config.database_path, "custom.db");
        assert_eq!(config.library_root, "/magazines");
    }
}
