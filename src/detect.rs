//! Source-format detection: delimiter guessing and header-row counting.
//!
//! Both are content heuristics over the first lines of a file. Detection
//! never falls back to a default delimiter; when the sample is inconclusive
//! the caller has to ask the user instead of silently mis-splitting cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numeric;

/// Number of lines sampled when guessing a delimiter.
const SAMPLE_LINES: usize = 5;

/// Cell delimiters recognized in source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delimiter {
    Comma,
    Tab,
    Colon,
    Semicolon,
}

impl Delimiter {
    /// All recognized delimiters, in detection priority order. When two
    /// candidates both pass the consistency test, the earlier one wins.
    pub const ALL: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Colon,
        Delimiter::Semicolon,
    ];

    /// The literal cell-separator string.
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Colon => ":",
            Delimiter::Semicolon => ";",
        }
    }

    /// Delimiter implied by a file extension, if the extension pins one.
    ///
    /// `csv` and `tsv` are unambiguous. `txt` and everything else carry no
    /// delimiter information and fall through to content sampling.
    pub fn from_extension(extension: &str) -> Option<Delimiter> {
        if extension.eq_ignore_ascii_case("csv") {
            Some(Delimiter::Comma)
        } else if extension.eq_ignore_ascii_case("tsv") {
            Some(Delimiter::Tab)
        } else {
            None
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Comma => "Comma",
            Delimiter::Tab => "Tab",
            Delimiter::Colon => "Colon",
            Delimiter::Semicolon => "Semicolon",
        };
        write!(f, "{}", name)
    }
}

/// Guess the delimiter from raw text lines.
///
/// Samples up to the first five lines. A candidate passes when every sampled
/// line contains the same nonzero number of occurrences of its literal; the
/// first candidate in priority order to pass wins. Fewer than two lines is
/// not enough signal and yields `None`.
pub fn detect_delimiter(lines: &[&str]) -> Option<Delimiter> {
    if lines.len() < 2 {
        return None;
    }
    let sample = &lines[..lines.len().min(SAMPLE_LINES)];
    for candidate in Delimiter::ALL {
        if consistent_count(sample, candidate.as_str()) {
            log::debug!(
                "delimiter detected: {} over {} sampled lines",
                candidate,
                sample.len()
            );
            return Some(candidate);
        }
    }
    log::debug!("no delimiter passed the consistency test");
    None
}

/// Convenience over raw content: split into lines, then detect.
pub fn detect_delimiter_in(content: &str) -> Option<Delimiter> {
    let lines: Vec<&str> = content.lines().collect();
    detect_delimiter(&lines)
}

/// True when every sampled line contains the same nonzero count of `token`.
fn consistent_count(lines: &[&str], token: &str) -> bool {
    let first = lines[0].matches(token).count();
    first > 0 && lines.iter().all(|line| line.matches(token).count() == first)
}

/// Count the leading header rows of a split cell grid.
///
/// A row is a header row as long as its first cell does not read as a
/// number; the count stops at the first row whose first cell parses. When no
/// row qualifies as data the whole input is headers and the row count itself
/// comes back, rather than scanning past the end.
pub fn count_header_rows(rows: &[Vec<String>]) -> usize {
    for (index, row) in rows.iter().enumerate() {
        let first = row.first().map(String::as_str).unwrap_or("");
        if numeric::is_numeric(first) {
            return index;
        }
    }
    rows.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_detects_comma() {
        let lines = ["a,b,c", "1,2,3", "4,5,6"];
        assert_eq!(detect_delimiter(&lines), Some(Delimiter::Comma));
    }

    #[test]
    fn test_detects_tab() {
        let lines = ["a\tb", "1\t2"];
        assert_eq!(detect_delimiter(&lines), Some(Delimiter::Tab));
    }

    #[test]
    fn test_priority_order_breaks_ties() {
        // Every line has exactly one comma and one semicolon; comma is
        // earlier in priority order and must win.
        let lines = ["a,b;c", "d,e;f", "g,h;i"];
        assert_eq!(detect_delimiter(&lines), Some(Delimiter::Comma));
    }

    #[test]
    fn test_inconsistent_counts_fail() {
        let lines = ["a,b", "c,d,e"];
        assert_eq!(detect_delimiter(&lines), None);
    }

    #[test]
    fn test_single_line_is_inconclusive() {
        let lines = ["a,b,c"];
        assert_eq!(detect_delimiter(&lines), None);
    }

    #[test]
    fn test_sample_stops_at_five_lines() {
        // Line six is malformed but sits outside the sample window.
        let lines = ["a,b", "c,d", "e,f", "g,h", "i,j", "broken"];
        assert_eq!(detect_delimiter(&lines), Some(Delimiter::Comma));
    }

    #[test]
    fn test_detect_in_content() {
        assert_eq!(
            detect_delimiter_in("x;y\n1;2\n3;4\n"),
            Some(Delimiter::Semicolon)
        );
        assert_eq!(detect_delimiter_in("just one line"), None);
    }

    #[test]
    fn test_extension_fast_path() {
        assert_eq!(Delimiter::from_extension("csv"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::from_extension("TSV"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::from_extension("txt"), None);
        assert_eq!(Delimiter::from_extension("dat"), None);
    }

    #[test]
    fn test_counts_single_header_row() {
        let rows = grid(&[&["x", "y"], &["1.5", "2.5"], &["3.0", "4.0"]]);
        assert_eq!(count_header_rows(&rows), 1);
    }

    #[test]
    fn test_counts_zero_header_rows() {
        let rows = grid(&[&["1.0", "2.0"], &["3.0", "4.0"]]);
        assert_eq!(count_header_rows(&rows), 0);
    }

    #[test]
    fn test_all_rows_are_headers() {
        let rows = grid(&[&["a"], &["b"], &["c"]]);
        assert_eq!(count_header_rows(&rows), 3);
    }

    #[test]
    fn test_empty_first_cell_is_header() {
        let rows = grid(&[&["", "x"], &["1.0", "2.0"]]);
        assert_eq!(count_header_rows(&rows), 1);
    }

    #[test]
    fn test_nan_first_cell_is_data() {
        // NaN parses under the numeric grammar, so the row counts as data.
        let rows = grid(&[&["NaN", "2"]]);
        assert_eq!(count_header_rows(&rows), 0);
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(count_header_rows(&[]), 0);
    }
}
