//! Table parsers: a shared contract plus format-specific strategies.
//!
//! Parsing is soft wherever a cell-level problem can be absorbed (missing
//! cells take column defaults, bad numerics become NaN) and hard only where
//! the input's shape makes the format unreadable.

pub mod default;
pub mod squid3;

use std::collections::HashMap;

use thiserror::Error;

use crate::detect::Delimiter;
use crate::model::{DataTable, ValueType};
use crate::numeric;

pub use default::DefaultParser;
pub use squid3::Squid3Parser;

/// Number of non-empty cells sampled when classifying a column's type.
pub(crate) const TYPE_SAMPLE_SIZE: usize = 5;

/// Title given to columns whose header cells are all empty.
pub(crate) const UNTITLED_COLUMN: &str = "newColumn";

/// Structural problems that make input unreadable under a template.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("input contains no cells")]
    Empty,
    #[error("expected at least {expected} header rows, found {found}")]
    TooFewHeaderRows { expected: usize, found: usize },
    #[error("no category headers in the first row")]
    NoCategories,
    #[error("uncertainty column {title:?} (column {index}) has no column to its left")]
    UncertaintyWithoutTarget { title: String, index: usize },
}

/// A strategy turning split cells into a [`DataTable`].
pub trait DataParser {
    /// Parse a grid of cells. `label` becomes the table title.
    fn parse_cells(&self, cells: &[Vec<String>], label: &str) -> Result<DataTable, FormatError>;

    /// Split raw content by `delimiter`, then parse.
    fn parse_content(
        &self,
        content: &str,
        delimiter: Delimiter,
        label: &str,
    ) -> Result<DataTable, FormatError> {
        let cells = split_cells(content, delimiter.as_str());
        self.parse_cells(&cells, label)
    }
}

/// Split text content into trimmed cells by a literal delimiter.
///
/// Interior empty cells and blank lines survive (short rows later fill from
/// column defaults); only fully blank trailing rows are dropped, since a
/// file-final newline is layout rather than data.
pub fn split_cells(content: &str, delimiter: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = content
        .lines()
        .map(|line| {
            line.split(delimiter)
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect();
    while let Some(last) = rows.last() {
        if last.iter().all(String::is_empty) {
            rows.pop();
        } else {
            break;
        }
    }
    rows
}

/// Join the non-empty header cells of one column with `separator`.
pub(crate) fn join_header_cells(header_rows: &[Vec<String>], column: usize, separator: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for row in header_rows {
        if let Some(cell) = row.get(column) {
            let cell = cell.trim();
            if !cell.is_empty() {
                parts.push(cell);
            }
        }
    }
    parts.join(separator)
}

/// Classify a column by sampling up to five non-empty cells from its data
/// rows. `Number` only when every sampled cell reads as a number; a column
/// with nothing to sample stays `Text`.
pub(crate) fn classify_column(
    cells: &[Vec<String>],
    column: usize,
    first_data_row: usize,
) -> ValueType {
    let mut sampled = 0;
    for row in cells.iter().skip(first_data_row) {
        if sampled == TYPE_SAMPLE_SIZE {
            break;
        }
        let cell = row.get(column).map(|c| c.trim()).unwrap_or("");
        if cell.is_empty() {
            continue;
        }
        if !numeric::is_numeric(cell) {
            return ValueType::Text;
        }
        sampled += 1;
    }
    if sampled == 0 {
        ValueType::Text
    } else {
        ValueType::Number
    }
}

/// Widest row of the grid.
pub(crate) fn max_row_width(cells: &[Vec<String>]) -> usize {
    cells.iter().map(Vec::len).max().unwrap_or(0)
}

/// Running tally that gives duplicate titles a `(k)` suffix.
///
/// The first use of a title keeps it bare; the k-th reuse gets suffix `(k)`,
/// so `Age, Age, Age` becomes `Age, Age(1), Age(2)`.
#[derive(Debug, Default)]
pub(crate) struct TitleTally {
    seen: HashMap<String, usize>,
}

impl TitleTally {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn disambiguate(&mut self, title: String) -> String {
        let count = self.seen.entry(title.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            title
        } else {
            format!("{}({})", title, *count - 1)
        }
    }
}
