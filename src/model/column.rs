//! Column side of the table model: typed leaf columns and category groups.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::component::DataComponent;
use super::row::CellValue;
use crate::numeric;

/// Value type a column holds. Only `Number` columns can feed numeric plot
/// variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Number,
    Text,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Number => write!(f, "Number"),
            ValueType::Text => write!(f, "Text"),
        }
    }
}

/// A leaf column of a data table.
///
/// `index` is the column's position in the source cell grid; rows key their
/// value maps by it and variable bindings refer to it, so it stays stable
/// under retitling and selection changes. `dependent_column` carries the
/// index of an attached uncertainty column, a back-reference within the same
/// tree rather than an owning edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    title: String,
    selected: bool,
    value_type: ValueType,
    index: usize,
    dependent_column: Option<usize>,
}

impl DataColumn {
    pub fn new(title: impl Into<String>, value_type: ValueType, index: usize) -> Self {
        Self {
            title: title.into(),
            selected: true,
            value_type,
            index,
            dependent_column: None,
        }
    }

    pub fn number(title: impl Into<String>, index: usize) -> Self {
        Self::new(title, ValueType::Number, index)
    }

    pub fn text(title: impl Into<String>, index: usize) -> Self {
        Self::new(title, ValueType::Text, index)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Position in the source cell grid.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Source index of the uncertainty column attached to this one.
    pub fn dependent_column(&self) -> Option<usize> {
        self.dependent_column
    }

    pub(crate) fn set_dependent_column(&mut self, index: Option<usize>) {
        self.dependent_column = index;
    }

    /// Default substituted for missing cells: 0.0 for numbers, "" for text.
    pub fn default_value(&self) -> CellValue {
        match self.value_type {
            ValueType::Number => CellValue::Number(0.0),
            ValueType::Text => CellValue::Text(String::new()),
        }
    }

    /// Read one source cell under this column's type.
    ///
    /// Empty cells take the column default. A non-empty cell in a `Number`
    /// column that does not read as a number becomes NaN, so one bad cell
    /// never aborts an import.
    pub fn parse_value(&self, cell: &str) -> CellValue {
        let cell = cell.trim();
        if cell.is_empty() {
            return self.default_value();
        }
        match self.value_type {
            ValueType::Number => {
                CellValue::Number(numeric::parse_double(cell).unwrap_or(f64::NAN))
            }
            ValueType::Text => CellValue::Text(cell.to_string()),
        }
    }
}

/// A category header grouping adjacent columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCategory {
    title: String,
    selected: bool,
    children: Vec<ColumnNode>,
}

impl DataCategory {
    pub fn new(title: impl Into<String>, children: Vec<ColumnNode>) -> Self {
        Self {
            title: title.into(),
            selected: true,
            children,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn columns(&self) -> &[ColumnNode] {
        &self.children
    }
}

/// A node of the column tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnNode {
    Category(DataCategory),
    Column(DataColumn),
}

impl ColumnNode {
    /// The leaf column, when this node is one.
    pub fn as_column(&self) -> Option<&DataColumn> {
        match self {
            ColumnNode::Column(column) => Some(column),
            ColumnNode::Category(_) => None,
        }
    }

    pub fn as_column_mut(&mut self) -> Option<&mut DataColumn> {
        match self {
            ColumnNode::Column(column) => Some(column),
            ColumnNode::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&DataCategory> {
        match self {
            ColumnNode::Category(category) => Some(category),
            ColumnNode::Column(_) => None,
        }
    }
}

impl DataComponent for ColumnNode {
    fn title(&self) -> &str {
        match self {
            ColumnNode::Category(category) => &category.title,
            ColumnNode::Column(column) => &column.title,
        }
    }

    fn set_title(&mut self, title: &str) {
        match self {
            ColumnNode::Category(category) => category.title = title.to_string(),
            ColumnNode::Column(column) => column.title = title.to_string(),
        }
    }

    fn is_selected(&self) -> bool {
        match self {
            ColumnNode::Category(category) => category.selected,
            ColumnNode::Column(column) => column.selected,
        }
    }

    fn set_selected(&mut self, selected: bool) {
        match self {
            ColumnNode::Category(category) => category.selected = selected,
            ColumnNode::Column(column) => column.selected = selected,
        }
    }

    fn children(&self) -> &[Self] {
        match self {
            ColumnNode::Category(category) => &category.children,
            ColumnNode::Column(_) => &[],
        }
    }

    fn children_mut(&mut self) -> &mut [Self] {
        match self {
            ColumnNode::Category(category) => &mut category.children,
            ColumnNode::Column(_) => &mut [],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_number_column() {
        let column = DataColumn::number("ratio", 0);
        assert_eq!(column.parse_value("2.5"), CellValue::Number(2.5));
        assert_eq!(column.parse_value(""), CellValue::Number(0.0));
        assert_eq!(column.parse_value("   "), CellValue::Number(0.0));
        // Garbage in a numeric column degrades to NaN instead of failing
        match column.parse_value("bad") {
            CellValue::Number(value) => assert!(value.is_nan()),
            other => panic!("expected NaN, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_value_text_column() {
        let column = DataColumn::text("note", 3);
        assert_eq!(
            column.parse_value("  hello "),
            CellValue::Text("hello".into())
        );
        assert_eq!(column.parse_value(""), CellValue::Text(String::new()));
        // Numbers stay text in a text column
        assert_eq!(column.parse_value("42"), CellValue::Text("42".into()));
    }

    #[test]
    fn test_category_traversal() {
        let category = ColumnNode::Category(DataCategory::new(
            "U-Pb",
            vec![
                ColumnNode::Column(DataColumn::number("206Pb/238U", 0)),
                ColumnNode::Column(DataColumn::number("207Pb/235U", 1)),
            ],
        ));
        assert_eq!(category.count_children(), 2);
        assert!(!category.is_leaf());
        let leaves = category.leaf_children();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[1].title(), "207Pb/235U");
        assert!(category.find("206Pb/238U").is_some());
        assert_eq!(category.find("U-Pb").map(ColumnNode::title), Some("U-Pb"));
    }

    #[test]
    fn test_dependent_column_back_reference() {
        let mut column = DataColumn::number("206Pb/238U", 4);
        assert_eq!(column.dependent_column(), None);
        column.set_dependent_column(Some(5));
        assert_eq!(column.dependent_column(), Some(5));
    }
}
