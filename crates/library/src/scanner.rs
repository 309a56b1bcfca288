//! Library scanning and catalog reconciliation.
//!
//! The scanner walks one level of the library root, classifies what it
//! finds, and reconciles the results into the catalog. Directories become
//! magazines and their children become issues; archives sitting directly at
//! the root get a synthesized magazine derived from their series name.
//! Re-scans are idempotent: an issue whose source path is already cataloged
//! is skipped without being touched.

use crate::error::{LibraryError, LibraryResult};
use crate::filename::parse_filename;
use kiosk_core::{Magazine, NewIssue};
use kiosk_database::Catalog;
use kiosk_formats::{
    parse_comic_info, ArchiveFormat, ArchiveReader, ComicInfo, FolderReader, PageSource,
    COMIC_INFO_FILE,
};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

/// Counters reported after a scan completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Magazines resolved or created during the walk
    pub magazines_seen: usize,
    /// Issues newly inserted into the catalog
    pub issues_added: usize,
    /// Issue candidates skipped because their path was already cataloged
    pub issues_skipped: usize,
    /// Entries that failed and were isolated (logged, not fatal)
    pub entries_failed: usize,
}

/// Whether an issue candidate is an archive file or an image folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IssueKind {
    Archive,
    Folder,
}

/// Page count plus optional embedded metadata probed from a source.
struct SourceProbe {
    page_count: i64,
    info: Option<ComicInfo>,
}

/// Scans a library root and reconciles magazines and issues into the catalog.
pub struct LibraryScanner {
    catalog: Catalog,
}

impl LibraryScanner {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Walks the library root one level deep and reconciles everything found.
    ///
    /// Failures on individual entries are logged and counted but never abort
    /// the walk; only a missing or unreadable root is fatal.
    pub async fn scan(&self, root: &Path) -> LibraryResult<ScanSummary> {
        if !root.is_dir() {
            return Err(LibraryError::RootNotFound(root.display().to_string()));
        }

        info!("Starting library scan of {}", root.display());
        let mut summary = ScanSummary::default();

        for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    error!("Failed to read library entry: {}", e);
                    summary.entries_failed += 1;
                    continue;
                }
            };

            let path = entry.path();
            let result = if entry.file_type().is_dir() {
                self.scan_magazine_dir(path, &mut summary).await
            } else if is_archive(path) {
                self.scan_root_archive(root, path, &mut summary).await
            } else {
                debug!("Ignoring non-archive file {}", path.display());
                Ok(())
            };

            if let Err(e) = result {
                error!("Failed to process {}: {}", path.display(), e);
                summary.entries_failed += 1;
            }
        }

        info!(
            "Scan complete: {} magazines, {} issues added, {} skipped, {} failed",
            summary.magazines_seen,
            summary.issues_added,
            summary.issues_skipped,
            summary.entries_failed
        );
        Ok(summary)
    }

    /// A directory at the root is a magazine folder; its children are issue
    /// candidates. Child directories with no images are ignored, and a
    /// directory with no issue candidates at all gets no magazine row.
    async fn scan_magazine_dir(&self, dir: &Path, summary: &mut ScanSummary) -> LibraryResult<()> {
        let mut candidates = Vec::new();
        for child in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let child = match child {
                Ok(child) => child,
                Err(e) => {
                    warn!("Failed to read entry in {}: {}", dir.display(), e);
                    summary.entries_failed += 1;
                    continue;
                }
            };

            let path = child.path();
            let kind = if child.file_type().is_dir() {
                if FolderReader::new().image_count(path) == 0 {
                    debug!("Ignoring imageless directory {}", path.display());
                    continue;
                }
                IssueKind::Folder
            } else if is_archive(path) {
                IssueKind::Archive
            } else {
                continue;
            };

            candidates.push((path.to_path_buf(), kind));
        }

        if candidates.is_empty() {
            debug!("Ignoring directory with no issue entries {}", dir.display());
            return Ok(());
        }

        let series = file_name_of(dir)?;
        let magazine = self.resolve_magazine(&series, dir).await?;
        summary.magazines_seen += 1;

        for (path, kind) in candidates {
            if let Err(e) = self.reconcile_issue(&magazine, &path, kind, None, summary).await {
                error!("Failed to process issue {}: {}", path.display(), e);
                summary.entries_failed += 1;
            }
        }

        Ok(())
    }

    /// An archive directly at the root has no magazine folder, so one is
    /// synthesized under `<root>/<series>`. The series comes from embedded
    /// metadata when present, otherwise from the filename heuristic. If the
    /// derived series changes between scans the issue lands in a new
    /// magazine; the old one is never renamed.
    async fn scan_root_archive(
        &self,
        root: &Path,
        path: &Path,
        summary: &mut ScanSummary,
    ) -> LibraryResult<()> {
        let file_name = file_name_of(path)?;
        let probe = probe_source(path, IssueKind::Archive);

        let series = probe
            .info
            .as_ref()
            .and_then(|info| info.series.clone())
            .unwrap_or_else(|| parse_filename(&file_name).series);

        let magazine = self.resolve_magazine(&series, &root.join(&series)).await?;
        summary.magazines_seen += 1;

        self.reconcile_issue(&magazine, path, IssueKind::Archive, Some(probe), summary)
            .await
    }

    /// Resolve-or-create keyed by path. A concurrent create losing the race
    /// hits the UNIQUE constraint, in which case the winner's row is fetched.
    async fn resolve_magazine(&self, series: &str, path: &Path) -> LibraryResult<Magazine> {
        if let Some(magazine) = self.catalog.find_magazine_by_path(path).await? {
            return Ok(magazine);
        }

        match self.catalog.create_magazine(series, path).await {
            Ok(magazine) => {
                info!("Created magazine '{}' at {}", series, path.display());
                Ok(magazine)
            }
            Err(e) => match self.catalog.find_magazine_by_path(path).await? {
                Some(magazine) => Ok(magazine),
                None => Err(e.into()),
            },
        }
    }

    /// Inserts one issue unless its source path is already cataloged.
    async fn reconcile_issue(
        &self,
        magazine: &Magazine,
        path: &Path,
        kind: IssueKind,
        probe: Option<SourceProbe>,
        summary: &mut ScanSummary,
    ) -> LibraryResult<()> {
        if self.catalog.find_issue_by_path(path).await?.is_some() {
            debug!("Skipping already cataloged issue {}", path.display());
            summary.issues_skipped += 1;
            return Ok(());
        }

        let file_name = file_name_of(path)?;
        let probe = probe.unwrap_or_else(|| probe_source(path, kind));
        let guess = parse_filename(&file_name);

        // Embedded metadata wins over the filename heuristic wherever both
        // supply a value.
        let info = probe.info.unwrap_or_default();
        let title = info.title.unwrap_or_else(|| file_name.clone());
        let issue_number = info.number.unwrap_or(guess.issue_number);
        let volume = info.volume.unwrap_or(guess.volume);

        let new_issue = NewIssue {
            magazine_id: magazine.id,
            title: Some(title),
            volume: Some(volume),
            issue_number: Some(issue_number),
            file_name,
            file_path: path.to_path_buf(),
            page_count: probe.page_count,
        };

        let issue = self.catalog.create_issue(&new_issue).await?;
        info!(
            "Added issue '{}' with {} pages from {}",
            issue.title.as_deref().unwrap_or(&issue.file_name),
            issue.page_count,
            path.display()
        );
        summary.issues_added += 1;
        Ok(())
    }
}

/// Counts pages and reads the metadata sidecar in one pass over the source.
/// Read failures degrade to zero pages and no metadata rather than erroring.
fn probe_source(path: &Path, kind: IssueKind) -> SourceProbe {
    let reader: Box<dyn PageSource> = match kind {
        IssueKind::Archive => Box::new(ArchiveReader::new()),
        IssueKind::Folder => Box::new(FolderReader::new()),
    };

    let page_count = match reader.list_pages(path) {
        Ok(pages) => pages.len() as i64,
        Err(e) => {
            warn!("Failed to list pages in {}: {}", path.display(), e);
            0
        }
    };

    let info = match reader.read_sidecar(path, COMIC_INFO_FILE) {
        Ok(Some(bytes)) => parse_comic_info(&String::from_utf8_lossy(&bytes)),
        Ok(None) => None,
        Err(e) => {
            warn!("Failed to read sidecar in {}: {}", path.display(), e);
            None
        }
    };

    SourceProbe { page_count, info }
}

fn is_archive(path: &Path) -> bool {
    ArchiveFormat::from_path(path).is_some()
}

fn file_name_of(path: &Path) -> LibraryResult<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| LibraryError::InvalidPath(path.display().to_string()))
}
