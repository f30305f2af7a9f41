//! The default parser: flat header rows over flat data rows.

use crate::detect;
use crate::model::{ColumnNode, DataColumn, DataRow, DataTable, DataTemplate, RowNode};

use super::{
    classify_column, join_header_cells, max_row_width, DataParser, FormatError, TitleTally,
    UNTITLED_COLUMN,
};

/// Parses plain delimited tables: zero or more header rows followed by data
/// rows, no category grouping, no row segmentation.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultParser;

impl DataParser for DefaultParser {
    fn parse_cells(&self, cells: &[Vec<String>], label: &str) -> Result<DataTable, FormatError> {
        if cells.is_empty() {
            return Err(FormatError::Empty);
        }

        let header_rows = detect::count_header_rows(cells);
        let width = max_row_width(cells);

        // Column titles join the header cells top to bottom; duplicates get
        // a (k) suffix so titles stay unique table-wide.
        let mut tally = TitleTally::new();
        let mut columns = Vec::with_capacity(width);
        for index in 0..width {
            let joined = join_header_cells(&cells[..header_rows], index, "\n");
            let title = if joined.is_empty() {
                UNTITLED_COLUMN.to_string()
            } else {
                joined
            };
            let title = tally.disambiguate(title);
            let value_type = classify_column(cells, index, header_rows);
            columns.push(DataColumn::new(title, value_type, index));
        }

        let mut rows = Vec::with_capacity(cells.len() - header_rows);
        for (number, row_cells) in cells[header_rows..].iter().enumerate() {
            let mut row = DataRow::new(format!("row{}", number + 1));
            for column in &columns {
                let cell = row_cells
                    .get(column.index())
                    .map(String::as_str)
                    .unwrap_or("");
                row.set_value(column.index(), column.parse_value(cell));
            }
            rows.push(RowNode::Row(row));
        }

        log::info!(
            "parsed {:?}: {} columns, {} header rows, {} data rows",
            label,
            columns.len(),
            header_rows,
            rows.len()
        );

        let column_nodes = columns.into_iter().map(ColumnNode::Column).collect();
        Ok(DataTable::new(
            DataTemplate::Default,
            label,
            column_nodes,
            rows,
        ))
    }
}
