//! Variable binding and plot-data extraction.
//!
//! A plot never sees the table tree. The editing layer binds plot variables
//! to columns, extraction flattens the rows into uniform entries, and the
//! plot reads those.

pub mod binding;
pub mod extract;
pub mod variable;

pub use binding::{BindingError, VariableBindings};
pub use extract::{extract_plot_data, PlotEntry, PlotValue};
pub use variable::Variable;
