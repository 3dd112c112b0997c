//! Cell types: formatted text plus formatting metadata

use std::fmt;

/// RGBA color with channels in `[0, 1]`
///
/// A channel the source leaves out is `0.0`, matching how the Sheets API
/// omits zero-valued components.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    /// Create an opaque color
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Color {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Create a color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Convert to 8-bit RGB, clamping out-of-range channels
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (quantize(self.red), quantize(self.green), quantize(self.blue))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Formatting descriptor attached to a cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellFormat {
    /// Effective background color, if the source reported one
    pub background: Option<Color>,
}

impl CellFormat {
    /// Format with a solid background
    pub fn with_background(color: Color) -> Self {
        CellFormat {
            background: Some(color),
        }
    }
}

/// One grid position
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Formatted (display) text; `None` for an untouched cell
    pub text: Option<String>,
    /// Formatting metadata; `None` when the source reported none
    pub format: Option<CellFormat>,
}

impl Cell {
    /// Create a cell with text and no formatting
    pub fn text<S: Into<String>>(text: S) -> Self {
        Cell {
            text: Some(text.into()),
            format: None,
        }
    }

    /// Create a cell with no text
    pub fn empty() -> Self {
        Cell::default()
    }

    /// Builder: set the background color
    pub fn with_background(mut self, color: Color) -> Self {
        self.format = Some(CellFormat::with_background(color));
        self
    }

    /// Builder: set the background from a red channel alone
    pub fn with_red(self, red: f32) -> Self {
        self.with_background(Color::rgb(red, 0.0, 0.0))
    }

    /// Background color, if any
    pub fn background(&self) -> Option<&Color> {
        self.format.as_ref().and_then(|f| f.background.as_ref())
    }

    /// Check if the cell has no text
    pub fn is_blank(&self) -> bool {
        self.text.is_none()
    }
}
