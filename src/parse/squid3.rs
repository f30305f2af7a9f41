//! Squid3 report parser: one category row, four sub-header rows, and
//! aliquot-segmented data rows.
//!
//! Squid3 exports put category names in row 0, stacked column headers in
//! rows 1 through 4, and spot analyses from row 5 on. Uncertainty columns
//! announce themselves in the header (`±2σ %` and spelling variants) and
//! attach to the measurement column directly to their left. Spot labels
//! carry an aliquot prefix (`S1-1`, `S1-2`, ...) that groups consecutive
//! rows into segments.

use regex::Regex;

use crate::model::{
    ColumnNode, DataCategory, DataColumn, DataRow, DataSegment, DataTable, DataTemplate, RowNode,
};

use super::{
    classify_column, join_header_cells, DataParser, FormatError, TitleTally, UNTITLED_COLUMN,
};

/// Fixed header rows in a Squid3 report: the category row plus four column
/// sub-header rows.
const HEADER_ROWS: usize = 5;

/// Matches uncertainty column headers: a `±` or `+/-` marker, an optional
/// sigma-level digit, `σ` or `sigma`, and an optional percent sign.
const UNCERTAINTY_PATTERN: &str = r"(±|\+/-)\s*\d?\s*(σ|sigma)\s*%?";

/// Parser for Squid3 report exports.
pub struct Squid3Parser {
    uncertainty: Regex,
}

impl Squid3Parser {
    pub fn new() -> Self {
        Self {
            // The pattern is a constant; compilation cannot fail.
            uncertainty: Regex::new(UNCERTAINTY_PATTERN).unwrap(),
        }
    }
}

impl Default for Squid3Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl DataParser for Squid3Parser {
    fn parse_cells(&self, cells: &[Vec<String>], label: &str) -> Result<DataTable, FormatError> {
        if cells.is_empty() {
            return Err(FormatError::Empty);
        }
        if cells.len() < HEADER_ROWS {
            return Err(FormatError::TooFewHeaderRows {
                expected: HEADER_ROWS,
                found: cells.len(),
            });
        }

        let (categories, columns) = self.parse_categories(cells)?;
        let segments = parse_aliquots(cells, &columns);

        log::info!(
            "parsed {:?}: {} categories, {} columns, {} aliquots, {} data rows",
            label,
            categories.len(),
            columns.len(),
            segments.len(),
            cells.len() - HEADER_ROWS
        );

        Ok(DataTable::new(DataTemplate::Squid3, label, categories, segments))
    }
}

/// Span of one category over the global column list.
struct CategorySpan {
    title: String,
    column_count: usize,
}

impl Squid3Parser {
    /// Read the category row and the four sub-header rows into a column
    /// tree, attaching each uncertainty column to its left neighbor.
    ///
    /// Returns the tree alongside a flat copy of the leaf columns in source
    /// order, which the row parser consumes.
    fn parse_categories(
        &self,
        cells: &[Vec<String>],
    ) -> Result<(Vec<ColumnNode>, Vec<DataColumn>), FormatError> {
        let category_row = &cells[0];
        let starts: Vec<usize> = category_row
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.trim().is_empty())
            .map(|(index, _)| index)
            .collect();
        if starts.is_empty() {
            return Err(FormatError::NoCategories);
        }

        // Titles deduplicate in separate namespaces: categories against
        // categories, columns against all other columns table-wide.
        let mut category_tally = TitleTally::new();
        let mut column_tally = TitleTally::new();

        let mut spans = Vec::with_capacity(starts.len());
        let mut columns: Vec<DataColumn> = Vec::new();
        for (position, &start) in starts.iter().enumerate() {
            let end = starts
                .get(position + 1)
                .copied()
                .unwrap_or(category_row.len());
            let title = category_tally.disambiguate(category_row[start].trim().to_string());

            let before = columns.len();
            for index in start..end {
                let joined = join_header_cells(&cells[1..HEADER_ROWS], index, " ");
                let column_title = if joined.is_empty() {
                    UNTITLED_COLUMN.to_string()
                } else {
                    joined
                };
                let column_title = column_tally.disambiguate(column_title);
                let value_type = classify_column(cells, index, HEADER_ROWS);
                let column = DataColumn::new(column_title, value_type, index);

                if self.uncertainty.is_match(column.title()) {
                    match columns.last_mut() {
                        Some(previous) => previous.set_dependent_column(Some(index)),
                        None => {
                            return Err(FormatError::UncertaintyWithoutTarget {
                                title: column.title().to_string(),
                                index,
                            })
                        }
                    }
                }
                columns.push(column);
            }
            spans.push(CategorySpan {
                title,
                column_count: columns.len() - before,
            });
        }

        let mut nodes = Vec::with_capacity(spans.len());
        let mut remaining = columns.iter().cloned().map(ColumnNode::Column);
        for span in spans {
            let children: Vec<ColumnNode> = remaining.by_ref().take(span.column_count).collect();
            nodes.push(ColumnNode::Category(DataCategory::new(span.title, children)));
        }
        Ok((nodes, columns))
    }
}

/// Group the data rows into aliquot segments by label prefix.
///
/// A segment opens on the first row whose label does not start with the
/// current segment's defining prefix. The defining prefix is the opening
/// label cut after its last separator, so `S1-1` defines `S1-` and `S1-2`
/// continues the segment while `S2-1` breaks it. The segment keeps its
/// opening row's full label as title.
fn parse_aliquots(cells: &[Vec<String>], columns: &[DataColumn]) -> Vec<RowNode> {
    let data = &cells[HEADER_ROWS..];
    if data.is_empty() {
        return Vec::new();
    }
    let first_label = data[0].first().map(|cell| cell.trim()).unwrap_or("");
    if first_label.is_empty() {
        log::warn!("first data row has no label; no aliquots produced");
        return Vec::new();
    }

    let mut aliquots: Vec<(String, String, Vec<RowNode>)> = Vec::new();
    for row_cells in data {
        let label = row_cells
            .first()
            .map(|cell| cell.trim())
            .unwrap_or("")
            .to_string();
        let breaks = aliquots
            .last()
            .map_or(true, |(prefix, _, _)| !label.starts_with(prefix.as_str()));
        if breaks {
            aliquots.push((aliquot_prefix(&label).to_string(), label.clone(), Vec::new()));
        }

        let mut row = DataRow::new(label);
        for column in columns {
            let cell = row_cells
                .get(column.index())
                .map(String::as_str)
                .unwrap_or("");
            row.set_value(column.index(), column.parse_value(cell));
        }
        if let Some((_, _, rows)) = aliquots.last_mut() {
            rows.push(RowNode::Row(row));
        }
    }

    aliquots
        .into_iter()
        .map(|(_, title, rows)| RowNode::Segment(DataSegment::new(title, rows)))
        .collect()
}

/// Aliquot grouping prefix of a spot label: everything through the last
/// separator. Labels without a separator group by exact prefix match.
fn aliquot_prefix(label: &str) -> &str {
    match label.rfind(|c| matches!(c, '-' | '.' | '_')) {
        Some(position) => &label[..=position],
        None => label,
    }
}
