//! Hierarchical table model.
//!
//! Columns and rows are trees of one branch level: categories group columns,
//! segments group rows. Both trees share the [`DataComponent`] surface for
//! traversal, and leaves meet through source column indices rather than
//! references, so the two sides stay independently mutable.

pub mod column;
pub mod component;
pub mod row;
pub mod table;

pub use column::{ColumnNode, DataCategory, DataColumn, ValueType};
pub use component::DataComponent;
pub use row::{CellValue, DataRow, DataSegment, RowNode};
pub use table::{DataTable, DataTemplate, Uncertainty};
