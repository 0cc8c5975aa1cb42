//! Error types for metadata loading and configuration.

use std::error::Error;
use std::fmt;

// =#========================================================================#=
// CONFIGURATION ERROR
// =#========================================================================#=
/// Which role a requested column plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Column holding the sample identifiers matched against leaf labels
    Join,
    /// Categorical column used for coloring and filtering
    Color,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Join => f.write_str("join"),
            ColumnRole::Color => f.write_str("color"),
        }
    }
}

/// The requested metadata configuration cannot be applied.
///
/// Not fatal for a render request: the tree shape is still valid, and
/// [TreeView::render](crate::view::TreeView::render) falls back to a
/// neutral, uncategorized rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The metadata table has no column with this name.
    MissingColumn { column: String, role: ColumnRole },
    /// A palette needs at least one color.
    EmptyPalette,
}

impl ConfigurationError {
    pub fn missing_join_column(column: &str) -> Self {
        ConfigurationError::MissingColumn {
            column: column.to_string(),
            role: ColumnRole::Join,
        }
    }

    pub fn missing_color_column(column: &str) -> Self {
        ConfigurationError::MissingColumn {
            column: column.to_string(),
            role: ColumnRole::Color,
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MissingColumn { column, role } => {
                write!(f, "Metadata has no {role} column '{column}'")
            }
            ConfigurationError::EmptyPalette => write!(f, "Color palette is empty"),
        }
    }
}

impl Error for ConfigurationError {}

// =#========================================================================#=
// METADATA ERROR
// =#========================================================================#=
/// Error while loading or building a metadata table.
#[derive(Debug)]
pub enum MetadataError {
    /// Reading or decoding the CSV failed.
    Csv(csv::Error),
    /// Two columns share a name after trimming.
    DuplicateColumn(String),
    /// A row does not have one cell per column.
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::Csv(err) => write!(f, "Could not read metadata - {err}"),
            MetadataError::DuplicateColumn(name) => {
                write!(f, "Metadata column '{name}' appears more than once")
            }
            MetadataError::RowLength { row, expected, found } => write!(
                f,
                "Metadata row {row} has {found} cells, expected {expected}"
            ),
        }
    }
}

impl Error for MetadataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MetadataError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for MetadataError {
    fn from(err: csv::Error) -> Self {
        MetadataError::Csv(err)
    }
}
