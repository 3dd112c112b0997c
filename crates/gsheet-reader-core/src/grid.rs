//! Grid: the header row plus data rows of cells

use crate::cell::Cell;

/// One row of cells, in column order
pub type Row = Vec<Cell>;

/// Two-dimensional cell structure read from a sheet
///
/// Row 0 is the header. Rows may be ragged; sources commonly omit trailing
/// empty cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Create a grid from rows
    pub fn new(rows: Vec<Row>) -> Self {
        Grid { rows }
    }

    /// Create an unformatted grid from text rows
    pub fn from_text<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Grid::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Cell::text).collect())
                .collect(),
        )
    }

    /// All rows, header included
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows, header included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row, if present
    pub fn header_row(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Header names: the header row's present text values
    pub fn header(&self) -> Option<Vec<String>> {
        self.header_row().map(|row| text_values(row).collect())
    }

    /// Rows after the header
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Text view of every row, header included
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|row| text_values(row).collect()).collect()
    }

    /// Split into the header row and the data rows
    pub fn into_parts(self) -> Option<(Row, Vec<Row>)> {
        let mut rows = self.rows.into_iter();
        let header = rows.next()?;
        Some((header, rows.collect()))
    }
}

impl From<Vec<Row>> for Grid {
    fn from(rows: Vec<Row>) -> Self {
        Grid::new(rows)
    }
}

/// Present text values of a row, in order
///
/// Cells without text are skipped, so blanks inside a row close up.
pub fn text_values(row: &[Cell]) -> impl Iterator<Item = String> + '_ {
    row.iter().filter_map(|cell| cell.text.clone())
}
