//! Heuristic filename parsing.
//!
//! When an issue carries no embedded metadata, the scanner derives a
//! best-guess series name, issue number, and volume from the bare file or
//! folder name. The matchers run in priority order; the first one that
//! recognizes the name wins. False positives (a series name that itself
//! ends in digits) are an accepted limitation of the heuristic.

use kiosk_formats::ArchiveFormat;

/// Best-guess metadata derived from a file or folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameGuess {
    pub series: String,
    pub issue_number: String,
    pub volume: i64,
}

/// Pattern matchers tried in priority order. The fallback in
/// [`parse_filename`] handles anything none of these recognize.
const MATCHERS: &[fn(&str) -> Option<FilenameGuess>] = &[match_hash_number, match_trailing_number];

/// Parses a file or folder name into a series / issue number / volume guess.
///
/// Rules, in order:
/// 1. `<series> #<digits>` anywhere in the name: the digit run after the
///    first `#` is the issue number, the prefix is the series.
/// 2. `<series> <digits>` with the digit run as the last whitespace-separated
///    token: that run is the issue number, the prefix is the series.
/// 3. Otherwise the whole name is the series and the issue number is `"1"`.
///
/// The volume always defaults to 1; only embedded metadata can say otherwise.
pub fn parse_filename(name: &str) -> FilenameGuess {
    let stem = strip_archive_extension(name);

    for matcher in MATCHERS {
        if let Some(guess) = matcher(stem) {
            return guess;
        }
    }

    FilenameGuess {
        series: stem.trim().to_string(),
        issue_number: "1".to_string(),
        volume: 1,
    }
}

/// Removes a recognized archive extension, leaving other dots alone so that
/// names like `Journal 2024.04` keep their full stem.
fn strip_archive_extension(name: &str) -> &str {
    if let Some((stem, ext)) = name.rsplit_once('.') {
        if ArchiveFormat::from_extension(ext).is_some() {
            return stem;
        }
    }
    name
}

/// `<series> #<digits><trailing>` — digit run immediately after the first `#`.
fn match_hash_number(stem: &str) -> Option<FilenameGuess> {
    let (prefix, rest) = stem.split_once('#')?;

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let series = prefix.trim();
    if series.is_empty() {
        return None;
    }

    Some(FilenameGuess {
        series: series.to_string(),
        issue_number: digits,
        volume: 1,
    })
}

/// `<series> <digits>` — a pure digit run as the final whitespace-separated
/// token.
fn match_trailing_number(stem: &str) -> Option<FilenameGuess> {
    let trimmed = stem.trim_end();
    let (prefix, last) = trimmed.rsplit_once(char::is_whitespace)?;

    if last.is_empty() || !last.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let series = prefix.trim();
    if series.is_empty() {
        return None;
    }

    Some(FilenameGuess {
        series: series.to_string(),
        issue_number: last.to_string(),
        volume: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_number() {
        let guess = parse_filename("Playboy #01.cbz");
        assert_eq!(guess.series, "Playboy");
        assert_eq!(guess.issue_number, "01");
        assert_eq!(guess.volume, 1);
    }

    #[test]
    fn test_hash_number_with_trailing_text() {
        let guess = parse_filename("Heavy Metal #300 (2020).zip");
        assert_eq!(guess.series, "Heavy Metal");
        assert_eq!(guess.issue_number, "300");
    }

    #[test]
    fn test_hash_beats_trailing_number() {
        // Both rules could match; the hash rule has priority.
        let guess = parse_filename("Mad #12 1995.cbz");
        assert_eq!(guess.series, "Mad");
        assert_eq!(guess.issue_number, "12");
    }

    #[test]
    fn test_trailing_number() {
        let guess = parse_filename("National Geographic 042.cbz");
        assert_eq!(guess.series, "National Geographic");
        assert_eq!(guess.issue_number, "042");
        assert_eq!(guess.volume, 1);
    }

    #[test]
    fn test_fallback_whole_name() {
        let guess = parse_filename("Summer Special.cbz");
        assert_eq!(guess.series, "Summer Special");
        assert_eq!(guess.issue_number, "1");
        assert_eq!(guess.volume, 1);
    }

    #[test]
    fn test_folder_name_without_extension() {
        let guess = parse_filename("Wired 12");
        assert_eq!(guess.series, "Wired");
        assert_eq!(guess.issue_number, "12");
    }

    #[test]
    fn test_non_archive_dot_is_kept() {
        // ".04" is not an archive extension, so the stem keeps it and the
        // trailing token "2024.04" is not a pure digit run.
        let guess = parse_filename("Journal 2024.04");
        assert_eq!(guess.series, "Journal 2024.04");
        assert_eq!(guess.issue_number, "1");
    }

    #[test]
    fn test_hash_without_digits_falls_through() {
        let guess = parse_filename("Q#A Weekly 7.cbz");
        // Rule 1 fails (no digits after '#'), rule 2 matches.
        assert_eq!(guess.series, "Q#A Weekly");
        assert_eq!(guess.issue_number, "7");
    }

    #[test]
    fn test_bare_number_name() {
        // No prefix before the digits, so both rules refuse and the whole
        // name becomes the series.
        let guess = parse_filename("2000.cbz");
        assert_eq!(guess.series, "2000");
        assert_eq!(guess.issue_number, "1");
    }
}
