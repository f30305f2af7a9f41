//! The assembled data table: column tree, row tree, and table-level state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::column::{ColumnNode, DataColumn};
use super::component::DataComponent;
use super::row::{DataRow, RowNode};
use crate::parse::{DataParser, DefaultParser, Squid3Parser};

/// Source layout a table was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataTemplate {
    /// Flat header rows over flat data rows.
    Default,
    /// Squid3 report export: category row, four sub-header rows, aliquot
    /// segmented data rows.
    Squid3,
}

impl DataTemplate {
    /// The parser that reads this layout.
    pub fn parser(self) -> Box<dyn DataParser> {
        match self {
            DataTemplate::Default => Box::new(DefaultParser),
            DataTemplate::Squid3 => Box::new(Squid3Parser::new()),
        }
    }
}

impl fmt::Display for DataTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataTemplate::Default => write!(f, "Default"),
            DataTemplate::Squid3 => write!(f, "Squid 3"),
        }
    }
}

/// How reported uncertainty values are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Uncertainty {
    OneSigmaAbsolute,
    OneSigmaPercent,
    TwoSigmaAbsolute,
    TwoSigmaPercent,
    NinetyFivePercentConfidence,
}

impl Uncertainty {
    /// Multiplier a plot applies when drawing uncertainty bars.
    pub fn multiplier(self) -> f64 {
        match self {
            Uncertainty::OneSigmaAbsolute | Uncertainty::OneSigmaPercent => 1.0,
            Uncertainty::TwoSigmaAbsolute | Uncertainty::TwoSigmaPercent => 2.0,
            Uncertainty::NinetyFivePercentConfidence => 2.4477,
        }
    }

    /// Whether stored values are percentages of their measurement.
    pub fn is_percent(self) -> bool {
        matches!(
            self,
            Uncertainty::OneSigmaPercent | Uncertainty::TwoSigmaPercent
        )
    }
}

impl fmt::Display for Uncertainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Uncertainty::OneSigmaAbsolute => "1σ (abs)",
            Uncertainty::OneSigmaPercent => "1σ (%)",
            Uncertainty::TwoSigmaAbsolute => "2σ (abs)",
            Uncertainty::TwoSigmaPercent => "2σ (%)",
            Uncertainty::NinetyFivePercentConfidence => "95% conf.",
        };
        write!(f, "{}", name)
    }
}

/// A parsed data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    title: String,
    template: DataTemplate,
    uncertainty: Uncertainty,
    columns: Vec<ColumnNode>,
    rows: Vec<RowNode>,
}

impl DataTable {
    /// Assemble a table from parser output. Uncertainty starts at 1σ
    /// absolute until the user states otherwise.
    pub fn new(
        template: DataTemplate,
        title: impl Into<String>,
        columns: Vec<ColumnNode>,
        rows: Vec<RowNode>,
    ) -> Self {
        Self {
            title: title.into(),
            template,
            uncertainty: Uncertainty::OneSigmaAbsolute,
            columns,
            rows,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn template(&self) -> DataTemplate {
        self.template
    }

    pub fn uncertainty(&self) -> Uncertainty {
        self.uncertainty
    }

    pub fn set_uncertainty(&mut self, uncertainty: Uncertainty) {
        self.uncertainty = uncertainty;
    }

    /// Root nodes of the column tree.
    pub fn column_nodes(&self) -> &[ColumnNode] {
        &self.columns
    }

    pub fn column_nodes_mut(&mut self) -> &mut [ColumnNode] {
        &mut self.columns
    }

    /// Root nodes of the row tree.
    pub fn row_nodes(&self) -> &[RowNode] {
        &self.rows
    }

    pub fn row_nodes_mut(&mut self) -> &mut [RowNode] {
        &mut self.rows
    }

    /// Leaf columns in left-to-right source order.
    pub fn leaf_columns(&self) -> Vec<&DataColumn> {
        self.columns
            .iter()
            .flat_map(|node| node.leaf_children())
            .filter_map(ColumnNode::as_column)
            .collect()
    }

    /// Leaf rows in depth-first order: segment order, then row order within
    /// each segment.
    pub fn leaf_rows(&self) -> Vec<&DataRow> {
        self.rows
            .iter()
            .flat_map(|node| node.leaf_children())
            .filter_map(RowNode::as_row)
            .collect()
    }

    /// Leaf column with the given source index.
    pub fn column_by_index(&self, index: usize) -> Option<&DataColumn> {
        self.leaf_columns()
            .into_iter()
            .find(|column| column.index() == index)
    }

    /// Depth-first title search over the column tree.
    pub fn find_column(&self, title: &str) -> Option<&ColumnNode> {
        self.columns.iter().find_map(|node| node.find(title))
    }

    /// Depth-first title search over the row tree.
    pub fn find_row(&self, title: &str) -> Option<&RowNode> {
        self.rows.iter().find_map(|node| node.find(title))
    }
}
