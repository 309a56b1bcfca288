//! `ComicInfo.xml` metadata extraction
//!
//! An issue archive or folder may carry a fixed-name XML sidecar describing
//! the issue. Parsing is strictly best-effort: missing or malformed input
//! yields `None` and a log line, never an error to the caller, who falls
//! back to filename heuristics.

use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

/// Fixed sidecar file name looked up inside archives and folders
pub const COMIC_INFO_FILE: &str = "ComicInfo.xml";

/// Metadata extracted from a `ComicInfo.xml` sidecar.
///
/// Ephemeral: informs the issue row at creation time and is discarded
/// afterwards. `number` stays text because labels like "Special" are legal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComicInfo {
    pub title: Option<String>,
    pub series: Option<String>,
    pub number: Option<String>,
    pub volume: Option<i64>,
    pub summary: Option<String>,
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub writer: Option<String>,
    pub penciller: Option<String>,
    pub inker: Option<String>,
    pub colorist: Option<String>,
    pub letterer: Option<String>,
    pub cover_artist: Option<String>,
    pub editor: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i64>,
}

/// Parses a `ComicInfo.xml` document.
///
/// Returns `None` when the document is malformed or has no `ComicInfo`
/// root element. Numeric fields are coerced from text; values that fail to
/// parse as numbers are dropped rather than failing the whole document.
pub fn parse_comic_info(xml: &str) -> Option<ComicInfo> {
    match parse_inner(xml) {
        Ok(info) => info,
        Err(e) => {
            warn!("Failed to parse ComicInfo.xml: {}", e);
            None
        }
    }
}

fn parse_inner(xml: &str) -> Result<Option<ComicInfo>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut info = ComicInfo::default();
    let mut seen_root = false;
    let mut text_buffer = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let element_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if element_name == "ComicInfo" {
                    seen_root = true;
                }
                text_buffer.clear();
            }
            Event::Text(e) => {
                text_buffer = e.unescape().map(|s| s.to_string()).unwrap_or_default();
            }
            Event::End(e) => {
                let element_name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                if seen_root {
                    match element_name.as_str() {
                        "Title" => info.title = non_empty(&text_buffer),
                        "Series" => info.series = non_empty(&text_buffer),
                        "Number" => info.number = non_empty(&text_buffer),
                        "Volume" => info.volume = text_buffer.trim().parse().ok(),
                        "Summary" => info.summary = non_empty(&text_buffer),
                        "Year" => info.year = text_buffer.trim().parse().ok(),
                        "Month" => info.month = text_buffer.trim().parse().ok(),
                        "Writer" => info.writer = non_empty(&text_buffer),
                        "Penciller" => info.penciller = non_empty(&text_buffer),
                        "Inker" => info.inker = non_empty(&text_buffer),
                        "Colorist" => info.colorist = non_empty(&text_buffer),
                        "Letterer" => info.letterer = non_empty(&text_buffer),
                        "CoverArtist" => info.cover_artist = non_empty(&text_buffer),
                        "Editor" => info.editor = non_empty(&text_buffer),
                        "Publisher" => info.publisher = non_empty(&text_buffer),
                        "PageCount" => info.page_count = text_buffer.trim().parse().ok(),
                        _ => {}
                    }
                }

                text_buffer.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if seen_root {
        Ok(Some(info))
    } else {
        Ok(None)
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
