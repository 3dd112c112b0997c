//! Record shapes and header validation
//!
//! A [`RecordShape`] is the declarative description of the records a sheet
//! should produce: an ordered list of typed fields, each either read from a
//! header column or derived from another signal. Column fields must line up
//! one-to-one, in order, with the sheet's header row.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Declared type of a record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Text, passed through unchanged
    String,
    /// Signed 64-bit integer
    Integer,
    /// 64-bit float
    Float,
    /// `true` / `false`, case-insensitive
    Boolean,
    /// One of a fixed set of names
    Enum(Vec<String>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => f.write_str("string"),
            FieldType::Integer => f.write_str("integer"),
            FieldType::Float => f.write_str("float"),
            FieldType::Boolean => f.write_str("boolean"),
            FieldType::Enum(variants) => write!(f, "one of [{}]", variants.join(", ")),
        }
    }
}

/// Where a field's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSource {
    /// The next header column
    #[default]
    Column,
    /// The row's highlight flag (derived, no header column)
    Highlight,
}

/// One field of a record shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub source: FieldSource,
}

impl FieldSpec {
    /// Field read from a header column
    pub fn column<S: Into<String>>(name: S, field_type: FieldType) -> Self {
        FieldSpec {
            name: name.into(),
            field_type,
            source: FieldSource::Column,
        }
    }

    /// Boolean field derived from the row's highlight flag
    pub fn highlight<S: Into<String>>(name: S) -> Self {
        FieldSpec {
            name: name.into(),
            field_type: FieldType::Boolean,
            source: FieldSource::Highlight,
        }
    }

    /// Check if the field has no header column
    pub fn is_derived(&self) -> bool {
        self.source != FieldSource::Column
    }
}

/// Ordered schema of the records produced from a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordShape {
    fields: Vec<FieldSpec>,
}

impl RecordShape {
    /// Create a shape, rejecting duplicate names, empty enums, and
    /// non-boolean highlight fields
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let shape = RecordShape { fields };
        shape.check()?;
        Ok(shape)
    }

    /// Parse a shape from its JSON form
    ///
    /// ```json
    /// {"fields": [
    ///   {"name": "Name", "type": "string"},
    ///   {"name": "IsHighlighted", "type": "boolean", "source": "highlight"}
    /// ]}
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let shape: RecordShape = serde_json::from_str(json)
            .map_err(|e| Error::invalid_shape(format!("malformed shape JSON: {e}")))?;
        shape.check()?;
        Ok(shape)
    }

    /// All fields in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Fields backed by a header column, in order
    pub fn column_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| !f.is_derived())
    }

    /// Header names the sheet must carry, in order
    pub fn expected_header(&self) -> Vec<String> {
        self.column_fields().map(|f| f.name.clone()).collect()
    }

    /// Check a header row against the shape's column fields
    ///
    /// Names are compared exactly (case-sensitive), position by position, and
    /// the lengths must agree.
    pub fn validate_header<S: AsRef<str>>(&self, header: &[S]) -> Result<()> {
        let expected = self.column_fields().map(|f| f.name.as_str());
        let matches = self.column_fields().count() == header.len()
            && expected.zip(header).all(|(want, got)| want == got.as_ref());

        if matches {
            Ok(())
        } else {
            Err(Error::SchemaMismatch {
                expected: self.expected_header(),
                actual: header.iter().map(|h| h.as_ref().to_string()).collect(),
            })
        }
    }

    fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::invalid_shape(format!(
                    "duplicate field '{}'",
                    field.name
                )));
            }
            if matches!(&field.field_type, FieldType::Enum(v) if v.is_empty()) {
                return Err(Error::invalid_shape(format!(
                    "enum field '{}' has no variants",
                    field.name
                )));
            }
            if field.source == FieldSource::Highlight && field.field_type != FieldType::Boolean {
                return Err(Error::invalid_shape(format!(
                    "highlight field '{}' must be boolean, not {}",
                    field.name, field.field_type
                )));
            }
        }
        Ok(())
    }
}

impl Default for RecordShape {
    /// `Name: string`, `Number: integer`, `IsHighlighted: boolean (highlight)`
    fn default() -> Self {
        RecordShape {
            fields: vec![
                FieldSpec::column("Name", FieldType::String),
                FieldSpec::column("Number", FieldType::Integer),
                FieldSpec::highlight("IsHighlighted"),
            ],
        }
    }
}
