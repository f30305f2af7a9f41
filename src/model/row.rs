//! Row side of the table model: leaf rows and aliquot segments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::component::DataComponent;

/// A typed cell value. Serializes untagged, so numbers stay JSON numbers
/// and text stays a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Number(_) => None,
            CellValue::Text(text) => Some(text),
        }
    }
}

/// One observation: a leaf row holding at most one value per leaf column.
///
/// Values are keyed by source column index, the same index stored on
/// [`DataColumn`](super::DataColumn), so rows stay valid when columns are
/// retitled or deselected. The map is ordered for deterministic iteration
/// and serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    title: String,
    selected: bool,
    visible: bool,
    values: BTreeMap<usize, CellValue>,
}

impl DataRow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            selected: true,
            visible: true,
            values: BTreeMap::new(),
        }
    }

    pub fn with_values(title: impl Into<String>, values: BTreeMap<usize, CellValue>) -> Self {
        Self {
            title: title.into(),
            selected: true,
            visible: true,
            values,
        }
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

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Value stored under a column's source index.
    pub fn value_at(&self, column_index: usize) -> Option<&CellValue> {
        self.values.get(&column_index)
    }

    pub fn set_value(&mut self, column_index: usize, value: CellValue) {
        self.values.insert(column_index, value);
    }

    pub fn values(&self) -> &BTreeMap<usize, CellValue> {
        &self.values
    }
}

/// An aliquot: a run of consecutive rows sharing a label prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSegment {
    title: String,
    selected: bool,
    children: Vec<RowNode>,
}

impl DataSegment {
    pub fn new(title: impl Into<String>, children: Vec<RowNode>) -> Self {
        Self {
            title: title.into(),
            selected: true,
            children,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[RowNode] {
        &self.children
    }
}

/// A node of the row tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowNode {
    Segment(DataSegment),
    Row(DataRow),
}

impl RowNode {
    /// The leaf row, when this node is one.
    pub fn as_row(&self) -> Option<&DataRow> {
        match self {
            RowNode::Row(row) => Some(row),
            RowNode::Segment(_) => None,
        }
    }

    pub fn as_row_mut(&mut self) -> Option<&mut DataRow> {
        match self {
            RowNode::Row(row) => Some(row),
            RowNode::Segment(_) => None,
        }
    }

    pub fn as_segment(&self) -> Option<&DataSegment> {
        match self {
            RowNode::Segment(segment) => Some(segment),
            RowNode::Row(_) => None,
        }
    }
}

impl DataComponent for RowNode {
    fn title(&self) -> &str {
        match self {
            RowNode::Segment(segment) => &segment.title,
            RowNode::Row(row) => &row.title,
        }
    }

    fn set_title(&mut self, title: &str) {
        match self {
            RowNode::Segment(segment) => segment.title = title.to_string(),
            RowNode::Row(row) => row.title = title.to_string(),
        }
    }

    fn is_selected(&self) -> bool {
        match self {
            RowNode::Segment(segment) => segment.selected,
            RowNode::Row(row) => row.selected,
        }
    }

    fn set_selected(&mut self, selected: bool) {
        match self {
            RowNode::Segment(segment) => segment.selected = selected,
            RowNode::Row(row) => row.selected = selected,
        }
    }

    fn children(&self) -> &[Self] {
        match self {
            RowNode::Segment(segment) => &segment.children,
            RowNode::Row(_) => &[],
        }
    }

    fn children_mut(&mut self) -> &mut [Self] {
        match self {
            RowNode::Segment(segment) => &mut segment.children,
            RowNode::Row(_) => &mut [],
        }
    }
}
