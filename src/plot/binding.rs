//! Table-scoped bindings between plot variables and data columns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::variable::Variable;
use crate::model::{DataColumn, ValueType};

/// Why a binding was refused. Bindings never replace silently; callers
/// unbind first when they mean to rebind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("variable {0} is already bound")]
    VariableTaken(Variable),
    #[error("column {title:?} is already bound to {variable}")]
    ColumnTaken { title: String, variable: Variable },
    #[error("variable {variable} needs a {expected} column, but {title:?} holds {actual}")]
    TypeMismatch {
        variable: Variable,
        title: String,
        expected: ValueType,
        actual: ValueType,
    },
    #[error("variable {0} reads row state and cannot be bound to a column")]
    NotBindable(Variable),
}

/// At most one column per variable and one variable per column, scoped to
/// one table. The editing layer mutates this; extraction only reads it.
///
/// Columns are held by source index, not reference, so bindings survive
/// retitling and stay serializable next to the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableBindings {
    by_variable: BTreeMap<Variable, usize>,
}

impl VariableBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `variable` to `column`. Both sides must be free and the column
    /// type must fit the variable.
    pub fn bind(&mut self, variable: Variable, column: &DataColumn) -> Result<(), BindingError> {
        if variable.is_row_state() {
            return Err(BindingError::NotBindable(variable));
        }
        let expected = if variable.is_numeric() {
            ValueType::Number
        } else {
            ValueType::Text
        };
        if column.value_type() != expected {
            return Err(BindingError::TypeMismatch {
                variable,
                title: column.title().to_string(),
                expected,
                actual: column.value_type(),
            });
        }
        if self.by_variable.contains_key(&variable) {
            return Err(BindingError::VariableTaken(variable));
        }
        if let Some(existing) = self.variable_for(column.index()) {
            return Err(BindingError::ColumnTaken {
                title: column.title().to_string(),
                variable: existing,
            });
        }
        self.by_variable.insert(variable, column.index());
        log::debug!("bound {} to column {} ({:?})", variable, column.index(), column.title());
        Ok(())
    }

    /// Remove a binding, returning the column index it held.
    pub fn unbind(&mut self, variable: Variable) -> Option<usize> {
        self.by_variable.remove(&variable)
    }

    /// Source index of the column bound to `variable`.
    pub fn column_index(&self, variable: Variable) -> Option<usize> {
        self.by_variable.get(&variable).copied()
    }

    /// Variable holding the column at `column_index`, if any.
    pub fn variable_for(&self, column_index: usize) -> Option<Variable> {
        self.by_variable
            .iter()
            .find(|(_, &index)| index == column_index)
            .map(|(&variable, _)| variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, usize)> + '_ {
        self.by_variable.iter().map(|(&variable, &index)| (variable, index))
    }

    pub fn len(&self) -> usize {
        self.by_variable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_variable.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_variable.clear();
    }
}
