//! Grid-to-records pipeline
//!
//! The pipeline walks a fixed sequence of stages:
//!
//! ```text
//! Fetched -> HeaderValidated -> HighlightsExtracted -> Merged -> Mapped
//! ```
//!
//! Each stage consumes the previous stage's output. The first error moves the
//! pipeline into [`PipelineState::Failed`], which is terminal; no records are
//! produced from a failed run.

use std::fmt;

use crate::error::{Error, Result};
use crate::grid::{text_values, Grid, Row};
use crate::highlight::HighlightRule;
use crate::pivot::transpose;
use crate::record::{MergedCell, Record, RecordMapper};
use crate::schema::RecordShape;

/// Sheet row number of the first data row (the header is row 1)
const FIRST_DATA_ROW: usize = 2;

/// Name of a pipeline stage, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Fetched,
    HeaderValidated,
    HighlightsExtracted,
    Merged,
    Mapped,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetched => "fetched",
            Stage::HeaderValidated => "header-validated",
            Stage::HighlightsExtracted => "highlights-extracted",
            Stage::Merged => "merged",
            Stage::Mapped => "mapped",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Pipeline state together with the data it carries
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// Grid received from the source
    Fetched(Grid),
    /// Header checked and stripped; data rows remain
    HeaderValidated(Vec<Row>),
    /// One highlight flag computed per data row
    HighlightsExtracted { rows: Vec<Row>, flags: Vec<bool> },
    /// Text rows with the highlight column appended
    Merged(Vec<Vec<MergedCell>>),
    /// Final records, in row order
    Mapped(Vec<Record>),
    /// Terminal failure
    Failed(Error),
}

impl PipelineState {
    /// Stage name of this state
    pub fn stage(&self) -> Stage {
        match self {
            PipelineState::Fetched(_) => Stage::Fetched,
            PipelineState::HeaderValidated(_) => Stage::HeaderValidated,
            PipelineState::HighlightsExtracted { .. } => Stage::HighlightsExtracted,
            PipelineState::Merged(_) => Stage::Merged,
            PipelineState::Mapped(_) => Stage::Mapped,
            PipelineState::Failed(_) => Stage::Failed,
        }
    }

    /// Check if no further step can change the state
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Mapped(_) | PipelineState::Failed(_))
    }
}

/// Turns a grid into records for one record shape
#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    shape: &'a RecordShape,
    rule: HighlightRule,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with the default highlight rule
    pub fn new(shape: &'a RecordShape) -> Self {
        Pipeline {
            shape,
            rule: HighlightRule::default(),
        }
    }

    /// Builder: use a different highlight rule
    pub fn with_rule(mut self, rule: HighlightRule) -> Self {
        self.rule = rule;
        self
    }

    /// Run every stage over a grid
    pub fn run(&self, grid: Grid) -> Result<Vec<Record>> {
        self.finish(PipelineState::Fetched(grid))
    }

    /// Run the remaining stages from any state
    ///
    /// Lets a caller step past header validation, act on the result, and
    /// then complete the run.
    pub fn finish(&self, mut state: PipelineState) -> Result<Vec<Record>> {
        loop {
            state = match self.step(state) {
                PipelineState::Mapped(records) => {
                    tracing::info!("Mapped {} records", records.len());
                    return Ok(records);
                }
                PipelineState::Failed(err) => return Err(err),
                next => next,
            };
        }
    }

    /// Advance one stage
    ///
    /// Terminal states are returned unchanged.
    pub fn step(&self, state: PipelineState) -> PipelineState {
        let from = state.stage();
        let next = match state {
            PipelineState::Fetched(grid) => self.validate(grid).map(PipelineState::HeaderValidated),
            PipelineState::HeaderValidated(rows) => {
                let flags = self.rule.extract(&rows).collect();
                Ok(PipelineState::HighlightsExtracted { rows, flags })
            }
            PipelineState::HighlightsExtracted { rows, flags } => self
                .check_widths(&rows)
                .map(|()| PipelineState::Merged(merge(&rows, flags))),
            PipelineState::Merged(rows) => self.map(&rows).map(PipelineState::Mapped),
            terminal => return terminal,
        };

        let next = next.unwrap_or_else(PipelineState::Failed);
        match &next {
            PipelineState::Failed(err) => tracing::warn!("Pipeline failed after {from}: {err}"),
            other => tracing::debug!("Pipeline {from} -> {}", other.stage()),
        }
        next
    }

    fn validate(&self, grid: Grid) -> Result<Vec<Row>> {
        let (header, rows) = grid.into_parts().ok_or(Error::EmptyGrid)?;
        let header: Vec<String> = text_values(&header).collect();
        self.shape.validate_header(header.as_slice())?;
        Ok(rows)
    }

    /// Reject the sheet when its narrowest row cannot fill every column field
    fn check_widths(&self, rows: &[Row]) -> Result<()> {
        let Some((index, width)) = narrowest_row(rows) else {
            return Ok(());
        };
        let expected = self.shape.column_fields().count();
        let row = index + FIRST_DATA_ROW;

        if width < expected {
            tracing::warn!("Row {row} has {width} values; the shape needs {expected}");
            return Err(Error::RaggedRow {
                row,
                width,
                expected,
            });
        }
        if rows.iter().any(|r| text_values(r).count() != width) {
            tracing::warn!("Rows differ in width; values past column {width} are dropped");
        }
        Ok(())
    }

    fn map(&self, rows: &[Vec<MergedCell>]) -> Result<Vec<Record>> {
        let mapper = RecordMapper::new(self.shape);
        rows.iter()
            .enumerate()
            .map(|(i, row)| mapper.map_row(i + FIRST_DATA_ROW, row))
            .collect()
    }
}

/// Append the highlight column to the text rows by way of the column view
///
/// Rows are transposed into columns (truncating to the narrowest row), the
/// flag column is appended, and the result is transposed back. Rows and flags
/// are paired by position.
pub fn merge(rows: &[Row], flags: Vec<bool>) -> Vec<Vec<MergedCell>> {
    let text_rows = rows
        .iter()
        .map(|row| text_values(row).map(MergedCell::Text));
    let flag_column: Vec<MergedCell> = flags.into_iter().map(MergedCell::Highlight).collect();

    let columns = transpose(text_rows).chain(std::iter::once(flag_column));
    transpose(columns).collect()
}

/// Index and text width of the first narrowest row
pub fn narrowest_row(rows: &[Row]) -> Option<(usize, usize)> {
    rows.iter()
        .map(|row| text_values(row).count())
        .enumerate()
        .min_by_key(|&(_, width)| width)
}

/// Run the default pipeline over a grid
pub fn grid_to_records(grid: Grid, shape: &RecordShape) -> Result<Vec<Record>> {
    Pipeline::new(shape).run(grid)
}
