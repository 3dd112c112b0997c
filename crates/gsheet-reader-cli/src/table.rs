//! Plain-text table rendering for the console

/// Render rows as a pipe-separated table
///
/// Every cell is padded to the width of the widest cell anywhere in the
/// grid, so columns line up even when rows are ragged.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let width = rows
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        out.push_str("| ");
        for cell in row {
            out.push_str(&format!("{:<width$} | ", cell, width = width));
        }
        out.push('\n');
    }
    out
}
