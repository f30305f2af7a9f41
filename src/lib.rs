//! Isotope-ratio data table import and plot-data extraction.
//!
//! `isotable` reads delimited isotope-ratio data files, plain tables and
//! Squid3 report exports alike, into a hierarchical model: categories
//! grouping typed columns, aliquot segments grouping rows. Plot variables
//! bind to columns per table, and extraction flattens the row tree into the
//! uniform entries a plotting component consumes, resolving percent
//! uncertainties to absolute values on the way.
//!
//! The editing, plotting, and persistence layers live outside this crate
//! and talk to it through [`DataTable`], [`VariableBindings`], and
//! [`PlotEntry`].

pub mod detect;
pub mod import;
pub mod log;
pub mod model;
pub mod numeric;
pub mod parse;
pub mod plot;

pub use detect::{count_header_rows, detect_delimiter, detect_delimiter_in, Delimiter};
pub use import::{import_content, import_file, ImportError, ImportOptions};
pub use model::{
    CellValue, ColumnNode, DataCategory, DataColumn, DataComponent, DataRow, DataSegment,
    DataTable, DataTemplate, RowNode, Uncertainty, ValueType,
};
pub use parse::{split_cells, DataParser, DefaultParser, FormatError, Squid3Parser};
pub use plot::{extract_plot_data, BindingError, PlotEntry, PlotValue, Variable, VariableBindings};

pub use crate::log::provenance::{ImportLog, LogEntry};
