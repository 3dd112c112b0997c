//! Sheets API v4 response types
//!
//! Only the parts of `spreadsheets.get` (with `includeGridData=true`) that
//! carry cell text and background color are modelled; everything else in the
//! document is ignored.

use serde::Deserialize;

use gsheet_reader_core::{Cell, CellFormat, Color, Grid};

use crate::error::{SheetsError, SheetsResult};

/// Field mask requesting exactly what [`Spreadsheet`] decodes
pub const FIELDS: &str = "spreadsheetId,properties.title,sheets(properties.title,\
data.rowData.values(formattedValue,effectiveFormat.backgroundColor,effectiveFormat.backgroundColorStyle))";

/// Top-level spreadsheet document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spreadsheet {
    pub spreadsheet_id: Option<String>,
    pub properties: Option<Properties>,
    pub sheets: Vec<Sheet>,
}

/// Title-bearing properties of a spreadsheet or sheet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Properties {
    pub title: Option<String>,
}

/// One sheet (tab)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Sheet {
    pub properties: Option<Properties>,
    pub data: Vec<GridData>,
}

/// A rectangular range of cell data
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridData {
    pub row_data: Vec<RowData>,
}

/// One row; empty rows come back as `{}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RowData {
    pub values: Vec<CellData>,
}

/// One cell
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellData {
    pub formatted_value: Option<String>,
    pub effective_format: Option<ApiCellFormat>,
}

/// Effective cell format
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCellFormat {
    pub background_color: Option<Color>,
    pub background_color_style: Option<ColorStyle>,
}

/// Color style; theme colors are not resolved
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorStyle {
    pub rgb_color: Option<Color>,
}

impl ApiCellFormat {
    /// Background color, preferring the plain `backgroundColor` field
    pub fn background(&self) -> Option<Color> {
        self.background_color.or_else(|| {
            self.background_color_style
                .as_ref()
                .and_then(|style| style.rgb_color)
        })
    }
}

impl From<&CellData> for Cell {
    fn from(data: &CellData) -> Self {
        Cell {
            text: data.formatted_value.clone(),
            format: data.effective_format.as_ref().map(|f| CellFormat {
                background: f.background(),
            }),
        }
    }
}

impl Spreadsheet {
    /// Spreadsheet title, if the document carries one
    pub fn title(&self) -> Option<&str> {
        self.properties.as_ref()?.title.as_deref()
    }

    /// Grid of the first sheet's first data range
    ///
    /// Further sheets and ranges are ignored.
    pub fn first_grid(&self) -> SheetsResult<Grid> {
        let sheet = self.sheets.first().ok_or(SheetsError::NoGridData)?;
        if self.sheets.len() > 1 {
            tracing::warn!(
                "Spreadsheet has {} sheets; reading only the first",
                self.sheets.len()
            );
        }
        let data = sheet.data.first().ok_or(SheetsError::NoGridData)?;

        let rows = data
            .row_data
            .iter()
            .map(|row| row.values.iter().map(Cell::from).collect())
            .collect();
        Ok(Grid::new(rows))
    }
}

/// Decode a `spreadsheets.get` response body
pub fn parse_spreadsheet(json: &str) -> SheetsResult<Spreadsheet> {
    Ok(serde_json::from_str(json)?)
}
