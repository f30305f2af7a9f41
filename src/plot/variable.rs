//! Plot variables: the semantic roles a plot reads from a table.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::extract::PlotValue;

/// A role in a classic scatter plot entry.
///
/// `X`, `SigmaX`, `Y`, `SigmaY`, and `Rho` bind to `Number` columns and
/// `Label` to a `Text` column. `Selected` and `Visible` are never bound;
/// they read row state during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    X,
    SigmaX,
    Y,
    SigmaY,
    Rho,
    Label,
    Selected,
    Visible,
}

impl Variable {
    /// The classic plot-entry key set; every extracted entry carries
    /// exactly these.
    pub const CLASSIC: [Variable; 8] = [
        Variable::X,
        Variable::SigmaX,
        Variable::Y,
        Variable::SigmaY,
        Variable::Rho,
        Variable::Label,
        Variable::Selected,
        Variable::Visible,
    ];

    /// Stable key used in serialized plot entries.
    pub fn name(self) -> &'static str {
        match self {
            Variable::X => "x",
            Variable::SigmaX => "sigma_x",
            Variable::Y => "y",
            Variable::SigmaY => "sigma_y",
            Variable::Rho => "rho",
            Variable::Label => "label",
            Variable::Selected => "selected",
            Variable::Visible => "visible",
        }
    }

    /// The measurement this variable is an uncertainty of, if any.
    pub fn dependency(self) -> Option<Variable> {
        match self {
            Variable::SigmaX => Some(Variable::X),
            Variable::SigmaY => Some(Variable::Y),
            _ => None,
        }
    }

    pub fn is_dependent(self) -> bool {
        self.dependency().is_some()
    }

    /// True for variables carrying numbers.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Variable::X | Variable::SigmaX | Variable::Y | Variable::SigmaY | Variable::Rho
        )
    }

    /// True for the row-state variables that extraction fills itself.
    pub fn is_row_state(self) -> bool {
        matches!(self, Variable::Selected | Variable::Visible)
    }

    /// Value an entry carries when the variable is unbound: 0.0 for
    /// numerics, "" for the label, true for row state.
    pub fn default_value(self) -> PlotValue {
        match self {
            v if v.is_numeric() => PlotValue::Number(0.0),
            Variable::Label => PlotValue::Text(String::new()),
            _ => PlotValue::Boolean(true),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
