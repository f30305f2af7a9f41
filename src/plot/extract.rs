//! Flattening a table's row tree into the uniform entries a plot consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::binding::VariableBindings;
use super::variable::Variable;
use crate::model::{CellValue, DataComponent, DataRow, DataTable, RowNode};

/// A value carried under one plot-entry key. Untagged, so entries serialize
/// to plain JSON objects (`{"x": 0.72, "label": "S1-1", "selected": true}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlotValue {
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl PlotValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PlotValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PlotValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PlotValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&CellValue> for PlotValue {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Number(number) => PlotValue::Number(*number),
            CellValue::Text(text) => PlotValue::Text(text.clone()),
        }
    }
}

/// One flat plot record. Always carries the full classic key set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotEntry {
    values: BTreeMap<Variable, PlotValue>,
}

impl PlotEntry {
    pub fn get(&self, variable: Variable) -> Option<&PlotValue> {
        self.values.get(&variable)
    }

    pub(crate) fn insert(&mut self, variable: Variable, value: PlotValue) {
        self.values.insert(variable, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &PlotValue)> + '_ {
        self.values.iter().map(|(&variable, value)| (variable, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Flatten the table's leaf rows into plot entries, one per row, in
/// depth-first order: segment order, then row order within each segment.
///
/// Every entry carries the complete classic key set. Bound variables take
/// the row's cell for their column; percent uncertainties convert to
/// absolute against the same row's value for their measurement variable;
/// everything unbound falls back to the variable default.
pub fn extract_plot_data(table: &DataTable, bindings: &VariableBindings) -> Vec<PlotEntry> {
    let mut entries = Vec::new();
    for node in table.row_nodes() {
        collect_entries(node, table, bindings, &mut entries);
    }
    log::debug!(
        "extracted {} plot entries from {:?} ({} bound variables)",
        entries.len(),
        table.title(),
        bindings.len()
    );
    entries
}

fn collect_entries(
    node: &RowNode,
    table: &DataTable,
    bindings: &VariableBindings,
    out: &mut Vec<PlotEntry>,
) {
    if let RowNode::Row(row) = node {
        out.push(row_entry(row, table, bindings));
        return;
    }
    for child in node.children() {
        collect_entries(child, table, bindings, out);
    }
}

fn row_entry(row: &DataRow, table: &DataTable, bindings: &VariableBindings) -> PlotEntry {
    let mut entry = PlotEntry::default();

    // Row state first; a bound Label overwrites the row title below.
    entry.insert(Variable::Label, PlotValue::Text(row.title().to_string()));
    entry.insert(Variable::Selected, PlotValue::Boolean(row.is_selected()));
    entry.insert(Variable::Visible, PlotValue::Boolean(row.is_visible()));

    for (variable, column_index) in bindings.iter() {
        let cell = match row.value_at(column_index) {
            Some(cell) => cell,
            None => continue,
        };
        let mut value = PlotValue::from(cell);
        if variable.is_dependent() && table.uncertainty().is_percent() {
            value = percent_to_absolute(value, variable, row, bindings);
        }
        entry.insert(variable, value);
    }

    for variable in Variable::CLASSIC {
        if entry.get(variable).is_none() {
            entry.insert(variable, variable.default_value());
        }
    }
    entry
}

/// Convert a percent uncertainty to absolute using the same row's value for
/// the measurement variable it depends on. When the dependency cannot be
/// resolved the raw value stays, under a warning.
fn percent_to_absolute(
    value: PlotValue,
    variable: Variable,
    row: &DataRow,
    bindings: &VariableBindings,
) -> PlotValue {
    let percent = match value {
        PlotValue::Number(number) => number,
        other => return other,
    };
    // is_dependent() was checked by the caller
    let dependency = match variable.dependency() {
        Some(dependency) => dependency,
        None => return PlotValue::Number(percent),
    };
    let base = bindings
        .column_index(dependency)
        .and_then(|index| row.value_at(index))
        .and_then(CellValue::as_number);
    match base {
        Some(base) => PlotValue::Number(percent / 100.0 * base),
        None => {
            log::warn!(
                "{} holds a percent uncertainty but {} is unresolved for row {:?}; keeping the raw value",
                variable,
                dependency,
                row.title()
            );
            PlotValue::Number(percent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ColumnNode, DataColumn, DataSegment, DataTemplate, Uncertainty,
    };

    /// Two segments of one row each; columns x, sigma-x, label.
    fn sample_table() -> (DataTable, VariableBindings) {
        let x = DataColumn::number("206Pb/238U", 0);
        let sigma_x = DataColumn::number("±2σ %", 1);
        let spot = DataColumn::text("spot", 2);

        let mut bindings = VariableBindings::new();
        bindings.bind(Variable::X, &x).unwrap();
        bindings.bind(Variable::SigmaX, &sigma_x).unwrap();
        bindings.bind(Variable::Label, &spot).unwrap();

        let columns = vec![
            ColumnNode::Column(x),
            ColumnNode::Column(sigma_x),
            ColumnNode::Column(spot),
        ];

        let mut first = DataRow::new("S1-1");
        first.set_value(0, CellValue::Number(2.0));
        first.set_value(1, CellValue::Number(5.0));
        first.set_value(2, CellValue::Text("S1-1".into()));
        let mut second = DataRow::new("S2-1");
        second.set_value(0, CellValue::Number(4.0));
        second.set_value(1, CellValue::Number(0.5));
        second.set_value(2, CellValue::Text("S2-1".into()));

        let rows = vec![
            RowNode::Segment(DataSegment::new("S1-1", vec![RowNode::Row(first)])),
            RowNode::Segment(DataSegment::new("S2-1", vec![RowNode::Row(second)])),
        ];
        let table = DataTable::new(DataTemplate::Squid3, "t", columns, rows);
        (table, bindings)
    }

    #[test]
    fn test_every_entry_carries_the_classic_keys() {
        let (table, bindings) = sample_table();
        let entries = extract_plot_data(&table, &bindings);
        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert_eq!(entry.len(), Variable::CLASSIC.len());
            for variable in Variable::CLASSIC {
                assert!(entry.get(variable).is_some(), "missing {}", variable);
            }
        }
    }

    #[test]
    fn test_absolute_uncertainty_passes_through() {
        let (table, bindings) = sample_table();
        let entries = extract_plot_data(&table, &bindings);
        assert_eq!(
            entries[0].get(Variable::SigmaX),
            Some(&PlotValue::Number(5.0))
        );
    }

    #[test]
    fn test_percent_uncertainty_converts_against_x() {
        let (mut table, bindings) = sample_table();
        table.set_uncertainty(Uncertainty::TwoSigmaPercent);
        let entries = extract_plot_data(&table, &bindings);
        // 5% of 2.0 and 0.5% of 4.0
        assert_eq!(
            entries[0].get(Variable::SigmaX),
            Some(&PlotValue::Number(0.1))
        );
        assert_eq!(
            entries[1].get(Variable::SigmaX),
            Some(&PlotValue::Number(0.02))
        );
        // The measurement itself never rescales
        assert_eq!(entries[0].get(Variable::X), Some(&PlotValue::Number(2.0)));
    }

    #[test]
    fn test_unbound_variables_take_defaults() {
        let (table, bindings) = sample_table();
        let entries = extract_plot_data(&table, &bindings);
        assert_eq!(entries[0].get(Variable::Y), Some(&PlotValue::Number(0.0)));
        assert_eq!(entries[0].get(Variable::Rho), Some(&PlotValue::Number(0.0)));
    }

    #[test]
    fn test_row_state_flows_into_entries() {
        let (mut table, bindings) = sample_table();
        if let Some(row) = table.row_nodes_mut()[0]
            .children_mut()
            .first_mut()
            .and_then(RowNode::as_row_mut)
        {
            row.set_selected(false);
            row.set_visible(false);
        }
        let entries = extract_plot_data(&table, &bindings);
        assert_eq!(
            entries[0].get(Variable::Selected),
            Some(&PlotValue::Boolean(false))
        );
        assert_eq!(
            entries[0].get(Variable::Visible),
            Some(&PlotValue::Boolean(false))
        );
        assert_eq!(
            entries[1].get(Variable::Selected),
            Some(&PlotValue::Boolean(true))
        );
    }

    #[test]
    fn test_bound_label_overrides_row_title() {
        let (table, bindings) = sample_table();
        let entries = extract_plot_data(&table, &bindings);
        assert_eq!(
            entries[0].get(Variable::Label),
            Some(&PlotValue::Text("S1-1".into()))
        );

        let mut unlabeled = bindings.clone();
        unlabeled.unbind(Variable::Label);
        let entries = extract_plot_data(&table, &unlabeled);
        // Falls back to the row title, not the empty default
        assert_eq!(
            entries[1].get(Variable::Label),
            Some(&PlotValue::Text("S2-1".into()))
        );
    }

    #[test]
    fn test_percent_without_bound_measurement_keeps_raw_value() {
        let (mut table, mut bindings) = sample_table();
        table.set_uncertainty(Uncertainty::OneSigmaPercent);
        bindings.unbind(Variable::X);
        let entries = extract_plot_data(&table, &bindings);
        assert_eq!(
            entries[0].get(Variable::SigmaX),
            Some(&PlotValue::Number(5.0))
        );
    }

    #[test]
    fn test_entries_serialize_to_flat_json_objects() {
        let (table, bindings) = sample_table();
        let entries = extract_plot_data(&table, &bindings);
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["x"], 2.0);
        assert_eq!(json["sigma_x"], 5.0);
        assert_eq!(json["label"], "S1-1");
        assert_eq!(json["selected"], true);
        assert_eq!(json["visible"], true);
        assert_eq!(json["y"], 0.0);
    }

    #[test]
    fn test_extraction_order_is_depth_first() {
        let (table, bindings) = sample_table();
        let entries = extract_plot_data(&table, &bindings);
        let labels: Vec<&str> = entries
            .iter()
            .filter_map(|entry| entry.get(Variable::Label))
            .filter_map(PlotValue::as_text)
            .collect();
        assert_eq!(labels, ["S1-1", "S2-1"]);
    }
}
