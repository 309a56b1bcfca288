//! Natural-order page sorting
//!
//! Page indexes are assigned under numeric-aware lexicographic order:
//! strings compare character-wise except that contiguous digit runs compare
//! by numeric value, so `page2.jpg` sorts before `page10.jpg`. The ordering
//! must be stable and deterministic for a fixed entry set regardless of the
//! order the filesystem or archive yields entries in.

use std::cmp::Ordering;

/// Compares two entry names in natural order, ignoring case.
///
/// Case-insensitive first, with an exact comparison as tie-break so equal
/// names modulo case still order deterministically.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match natord::compare_ignore_case(a, b) {
        Ordering::Equal => natord::compare(a, b),
        other => other,
    }
}
