//! In-memory tabular sample metadata.

use crate::metadata::error::{ConfigurationError, MetadataError};
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;

/// Cell contents read from CSV that count as missing values.
///
/// The default missing-value markers of dataframe CSV readers; any other
/// text, including surrounding whitespace, is kept verbatim.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// =#========================================================================#=
// METADATA TABLE
// =#========================================================================#=
/// Row-per-sample table of categorical attributes.
///
/// Column names are trimmed when the table is built; cell values are never
/// normalized, since one column holds the identifiers that must match leaf
/// labels exactly.
///
/// # Example
/// ```
/// use cladeview::metadata::MetadataTable;
///
/// let csv = "IGIB_id , severity\nA,Mild\nB,\n";
/// let table = MetadataTable::from_reader(csv.as_bytes()).unwrap();
/// assert_eq!(table.columns(), ["IGIB_id", "severity"]);
/// assert_eq!(table.row(0).get("severity"), Some("Mild"));
/// assert_eq!(table.row(1).get("severity"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl MetadataTable {
    /// Creates an empty table with the given column names (trimmed).
    ///
    /// # Errors
    /// [MetadataError::DuplicateColumn] if two names coincide after trimming.
    pub fn new<I, S>(columns: I) -> Result<Self, MetadataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .collect();

        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(duplicate) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(MetadataError::DuplicateColumn(duplicate.clone()));
        }

        Ok(MetadataTable {
            columns,
            rows: Vec::new(),
        })
    }

    /// Appends a row with one cell per column; `None` is a missing value.
    ///
    /// # Errors
    /// [MetadataError::RowLength] if the number of cells is off.
    pub fn push_row(&mut self, cells: Vec<Option<String>>) -> Result<(), MetadataError> {
        if cells.len() != self.columns.len() {
            return Err(MetadataError::RowLength {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Builds a table from string rows, treating empty strings as missing.
    ///
    /// Convenient for small in-memory tables; only empty cells are missing
    /// here, unlike [MISSING_MARKERS] for CSV input.
    pub fn from_rows<C, S, R, V>(columns: C, rows: R) -> Result<Self, MetadataError>
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: IntoIterator<Item = V>,
        V: IntoIterator<Item = S>,
    {
        let mut table = Self::new(columns)?;
        for row in rows {
            let cells = row
                .into_iter()
                .map(|cell| {
                    let cell = cell.as_ref();
                    if cell.is_empty() { None } else { Some(cell.to_string()) }
                })
                .collect();
            table.push_row(cells)?;
        }
        Ok(table)
    }

    /// Reads a CSV table with a header row.
    ///
    /// Header names are trimmed and repeated ones renamed to `name.1`,
    /// `name.2`, ...; cells equal to one of [MISSING_MARKERS] become
    /// missing values.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, MetadataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut table = Self::new(rename_duplicates(csv_reader.headers()?.iter()))?;
        for record in csv_reader.records() {
            let record = record?;
            let cells = record
                .iter()
                .map(|cell| {
                    if MISSING_MARKERS.contains(&cell) {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            table.push_row(cells)?;
        }
        Ok(table)
    }

    /// Reads a CSV file, see [from_reader](Self::from_reader).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let file = std::fs::File::open(&path).map_err(csv::Error::from)?;
        let table = Self::from_reader(io::BufReader::new(file))?;
        info!(
            "Loaded metadata from {} with {} rows and {} columns",
            path.as_ref().display(),
            table.num_rows(),
            table.columns.len()
        );
        Ok(table)
    }

    /// Returns the column names in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the position of the named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns a view of row `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn row(&self, index: usize) -> Record<'_> {
        assert!(index < self.rows.len(), "row {index} out of bounds");
        Record { table: self, index }
    }

    /// Returns all rows in table order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Record<'_>> + '_ {
        (0..self.rows.len()).map(move |index| Record { table: self, index })
    }

    pub(crate) fn require_column(
        &self,
        name: &str,
        missing: fn(&str) -> ConfigurationError,
    ) -> Result<usize, ConfigurationError> {
        self.column_index(name).ok_or_else(|| missing(name))
    }

    pub(crate) fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }
}

/// Renames repeated header names by appending `.1`, `.2`, ... to later
/// occurrences, skipping names that are already taken.
fn rename_duplicates<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();
    for header in headers {
        let header = header.trim();
        let mut name = header.to_string();
        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{name}.{count}");
            count = counts.get(&name).copied().unwrap_or(0);
        }
        if name != header {
            warn!("Duplicate metadata column '{header}' renamed to '{name}'");
        }
        counts.insert(name.clone(), 1);
        names.push(name);
    }
    names
}

// =#========================================================================#=
// RECORD
// =#========================================================================#=
/// One row of a [MetadataTable].
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a MetadataTable,
    index: usize,
}

impl<'a> Record<'a> {
    /// Returns the row position in its table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the value of the named column, `None` if missing or unknown.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.table
            .column_index(column)
            .and_then(|c| self.table.cell(self.index, c))
    }

    /// Returns the value at column position `column`, `None` if missing.
    pub fn get_at(&self, column: usize) -> Option<&'a str> {
        self.table.cell(self.index, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_columns_after_trim() {
        let err = MetadataTable::new(["id", " id "]).unwrap_err();
        assert!(matches!(err, MetadataError::DuplicateColumn(name) if name == "id"));
    }

    #[test]
    fn row_length_is_checked() {
        let mut table = MetadataTable::new(["id", "clade"]).unwrap();
        let err = table.push_row(vec![Some("A".to_string())]).unwrap_err();
        assert!(matches!(err, MetadataError::RowLength { row: 0, expected: 2, found: 1 }));
    }

    #[test]
    fn csv_missing_markers_and_verbatim_cells() {
        let csv = "id,serotype\nA,NA\nB, DENV-2\nC,DENV-3\n";
        let table = MetadataTable::from_reader(csv.as_bytes()).unwrap();
        let values: Vec<_> = table.rows().map(|r| r.get("serotype")).collect();
        assert_eq!(values, vec![None, Some(" DENV-2"), Some("DENV-3")]);
        assert_eq!(table.row(2).get("nope"), None);
    }

    #[test]
    fn csv_dataframe_missing_markers() {
        let csv: String = std::iter::once("id,lineage".to_string())
            .chain(MISSING_MARKERS.iter().enumerate().map(|(i, m)| format!("S{i},{m}")))
            .chain(std::iter::once("S99,NULLS\n".to_string()))
            .collect::<Vec<_>>()
            .join("\n");
        let table = MetadataTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.num_rows(), MISSING_MARKERS.len() + 1);
        for record in table.rows().take(MISSING_MARKERS.len()) {
            assert_eq!(record.get("lineage"), None, "row {}", record.index());
        }
        assert_eq!(table.row(MISSING_MARKERS.len()).get("lineage"), Some("NULLS"));

        let csv = "id,lineage\nA,NULL\nB,n/a\nC,#N/A\nD,<NA>\nE,-nan\n";
        let table = MetadataTable::from_reader(csv.as_bytes()).unwrap();
        assert!(table.rows().all(|r| r.get("lineage").is_none()));
    }

    #[test]
    fn csv_duplicate_headers_are_renamed() {
        let csv = "id,clade, clade,clade.1,clade\nA,x,y,z,w\n";
        let table = MetadataTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.columns(), ["id", "clade", "clade.1", "clade.1.1", "clade.2"]);
        assert_eq!(table.row(0).get("clade"), Some("x"));
        assert_eq!(table.row(0).get("clade.1"), Some("y"));
        assert_eq!(table.row(0).get("clade.2"), Some("w"));
    }

    #[test]
    fn ragged_csv_is_error() {
        let csv = "id,serotype\nA\n";
        assert!(matches!(
            MetadataTable::from_reader(csv.as_bytes()),
            Err(MetadataError::Csv(_))
        ));
    }
}
