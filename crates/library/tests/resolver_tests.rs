//! Integration tests for PageResolver

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use kiosk_core::IssueId;
use kiosk_library::{LibraryConfig, LibraryManager};
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

fn write_cbz(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();
    for (name, bytes) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
}

async fn scanned_manager(temp: &TempDir, root: &Path) -> LibraryManager {
    let db_path = temp.path().join("kiosk.db");
    let config = LibraryConfig::new(db_path.to_str().unwrap())
        .with_library_root(root.to_str().unwrap());
    let manager = LibraryManager::new(config).await.unwrap();
    manager.scan().await.unwrap();
    manager
}

async fn sole_issue_id(manager: &LibraryManager) -> IssueId {
    let magazines = manager.list_magazines().await.unwrap();
    let issues = manager.list_issues(magazines[0].id).await.unwrap();
    issues[0].id
}

#[tokio::test]
async fn test_resolve_pages_in_natural_order() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("library");
    let dir = root.join("Zine");
    fs::create_dir_all(&dir).unwrap();

    // Stored out of order on purpose; natural sort puts page2 before page10.
    write_cbz(
        &dir.join("Zine 1.cbz"),
        &[
            ("page10.jpg", b"tenth" as &[u8]),
            ("page1.jpg", b"first"),
            ("page2.jpg", b"second"),
        ],
    );

    let manager = scanned_manager(&temp, &root).await;
    let issue_id = sole_issue_id(&manager).await;

    let first = manager.resolve_page(issue_id, 0).await.unwrap().unwrap();
    assert_eq!(first.bytes, b"first");
    assert_eq!(first.content_type, "image/jpeg");

    let second = manager.resolve_page(issue_id, 1).await.unwrap().unwrap();
    assert_eq!(second.bytes, b"second");

    let tenth = manager.resolve_page(issue_id, 2).await.unwrap().unwrap();
    assert_eq!(tenth.bytes, b"tenth");
}

#[tokio::test]
async fn test_resolve_out_of_range_returns_none() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("library");
    let dir = root.join("Zine");
    fs::create_dir_all(&dir).unwrap();

    write_cbz(&dir.join("Zine 1.cbz"), &[("only.jpg", b"one" as &[u8])]);

    let manager = scanned_manager(&temp, &root).await;
    let issue_id = sole_issue_id(&manager).await;

    assert!(manager.resolve_page(issue_id, 1).await.unwrap().is_none());
    assert!(manager.resolve_page(issue_id, 500).await.unwrap().is_none());
}

#[tokio::test]
async fn test_resolve_unknown_issue_returns_none() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("library");
    fs::create_dir_all(&root).unwrap();

    let manager = scanned_manager(&temp, &root).await;
    let result = manager.resolve_page(IssueId::from_raw(9999), 0).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_resolve_folder_issue() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("library");
    let issue_dir = root.join("Fanzine").join("Fanzine 1");
    fs::create_dir_all(&issue_dir).unwrap();

    fs::write(issue_dir.join("02.png"), b"png-second").unwrap();
    fs::write(issue_dir.join("01.png"), b"png-first").unwrap();
    fs::write(issue_dir.join("notes.txt"), b"not a page").unwrap();

    let manager = scanned_manager(&temp, &root).await;
    let issue_id = sole_issue_id(&manager).await;

    let first = manager.resolve_page(issue_id, 0).await.unwrap().unwrap();
    assert_eq!(first.bytes, b"png-first");
    assert_eq!(first.content_type, "image/png");

    assert!(manager.resolve_page(issue_id, 2).await.unwrap().is_none());
}

#[tokio::test]
async fn test_custom_cover_override_on_page_zero() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("library");
    let dir = root.join("Zine");
    fs::create_dir_all(&dir).unwrap();

    write_cbz(
        &dir.join("Zine 1.cbz"),
        &[("page1.jpg", b"inside-cover" as &[u8]), ("page2.jpg", b"body")],
    );

    let cover_path = temp.path().join("custom-cover.png");
    fs::write(&cover_path, b"custom-cover-bytes").unwrap();

    let manager = scanned_manager(&temp, &root).await;
    let issue_id = sole_issue_id(&manager).await;

    let mut issue = manager.get_issue(issue_id).await.unwrap();
    issue.cover = Some(cover_path.clone());
    manager.update_issue(&issue).await.unwrap();

    let cover = manager.resolve_page(issue_id, 0).await.unwrap().unwrap();
    assert_eq!(cover.bytes, b"custom-cover-bytes");
    assert_eq!(cover.content_type, "image/png");

    // Pages past the cover come from the archive as usual.
    let body = manager.resolve_page(issue_id, 1).await.unwrap().unwrap();
    assert_eq!(body.bytes, b"body");
}

#[tokio::test]
async fn test_unreadable_cover_falls_back_to_first_page() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("library");
    let dir = root.join("Zine");
    fs::create_dir_all(&dir).unwrap();

    write_cbz(&dir.join("Zine 1.cbz"), &[("page1.jpg", b"first-page" as &[u8])]);

    let manager = scanned_manager(&temp, &root).await;
    let issue_id = sole_issue_id(&manager).await;

    let mut issue = manager.get_issue(issue_id).await.unwrap();
    issue.cover = Some(temp.path().join("deleted-cover.png"));
    manager.update_issue(&issue).await.unwrap();

    let page = manager.resolve_page(issue_id, 0).await.unwrap().unwrap();
    assert_eq!(page.bytes, b"first-page");
    assert_eq!(page.content_type, "image/jpeg");
}
