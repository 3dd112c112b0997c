//! Row highlight detection from cell formatting

use crate::cell::Cell;
use crate::grid::Row;

/// Background red channel that marks a highlighted cell
pub const HIGHLIGHT_RED: f32 = 0.8;

/// Maximum distance from [`HIGHLIGHT_RED`] still treated as a match
pub const RED_TOLERANCE: f32 = 1e-6;

/// Predicate deciding whether a cell counts as highlighted
///
/// A cell matches when its background red channel is within `tolerance` of
/// `red`. Cells without formatting or without a background never match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRule {
    pub red: f32,
    pub tolerance: f32,
}

impl Default for HighlightRule {
    fn default() -> Self {
        HighlightRule {
            red: HIGHLIGHT_RED,
            tolerance: RED_TOLERANCE,
        }
    }
}

impl HighlightRule {
    /// Create a rule for a reference red value with the default tolerance
    pub fn with_red(red: f32) -> Self {
        HighlightRule {
            red,
            ..Default::default()
        }
    }

    /// Check a single cell's formatting; text is never consulted
    pub fn matches(&self, cell: &Cell) -> bool {
        cell.background()
            .is_some_and(|bg| (bg.red - self.red).abs() <= self.tolerance)
    }

    /// Check a whole row
    ///
    /// Every cell must match. A row with no cells is highlighted.
    pub fn row_is_highlighted(&self, row: &[Cell]) -> bool {
        row.iter().all(|cell| self.matches(cell))
    }

    /// One flag per row, in row order
    pub fn extract<'a>(&'a self, rows: &'a [Row]) -> impl Iterator<Item = bool> + 'a {
        rows.iter().map(move |row| self.row_is_highlighted(row))
    }
}
