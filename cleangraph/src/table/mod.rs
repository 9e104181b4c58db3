//! Tabular data model and file I/O.
//!
//! [`Table`] holds ordered, uniquely named columns (each with a [`ColumnType`] tag) and
//! rows of [`Cell`]s. [`load_table`] reads CSV/TSV/spreadsheet files; [`save_table`]
//! writes the cleaned result next to a `cleaned_` prefixed name (see [`cleaned_path`]).

mod error;
mod io;
mod model;
mod value;

pub use error::TableError;
pub use io::{cleaned_path, is_tabular, load_table, save_table, FileFormat};
pub use model::{Column, Table, MISSING_MARKERS};
pub use value::{format_number, parse_datetime, Cell, ColumnType, Value};

pub(crate) use model::parse_number;
pub(crate) use value::{cell_key, number_to_json, ValueKey};
