//! Typed records and the row-to-record mapper

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use crate::schema::{FieldSource, FieldType, RecordShape};

/// A typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Enum variant, stored by name
    Enum(String),
}

impl FieldValue {
    /// Coerce cell text to a field type
    ///
    /// Returns `None` when the text is not a valid value of that type.
    pub fn parse(text: &str, field_type: &FieldType) -> Option<FieldValue> {
        match field_type {
            FieldType::String => Some(FieldValue::String(text.to_string())),
            FieldType::Integer => text.trim().parse().ok().map(FieldValue::Integer),
            FieldType::Float => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(FieldValue::Float),
            FieldType::Boolean => parse_bool(text).map(FieldValue::Boolean),
            FieldType::Enum(variants) => variants
                .iter()
                .find(|v| v.as_str() == text.trim())
                .map(|v| FieldValue::Enum(v.clone())),
        }
    }

    /// Try to get the value as a string slice (strings and enum names)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) | FieldValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) | FieldValue::Enum(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) | FieldValue::Enum(s) => serializer.serialize_str(s),
            FieldValue::Integer(n) => serializer.serialize_i64(*n),
            FieldValue::Float(n) => serializer.serialize_f64(*n),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

/// One output record: named values in shape order
///
/// Serializes as a map whose keys follow the shape's declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Build a record from name/value pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldValue)>,
        S: Into<String>,
    {
        Record {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Look up a value by field name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Fields in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A slot in a merged row: cell text, or the appended highlight column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedCell {
    Text(String),
    Highlight(bool),
}

impl MergedCell {
    /// Build a merged row from text values with the flag appended
    pub fn row<I, S>(texts: I, highlighted: bool) -> Vec<MergedCell>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .map(|t| MergedCell::Text(t.into()))
            .chain(std::iter::once(MergedCell::Highlight(highlighted)))
            .collect()
    }
}

/// Maps merged rows onto a [`RecordShape`]
#[derive(Debug, Clone, Copy)]
pub struct RecordMapper<'a> {
    shape: &'a RecordShape,
}

impl<'a> RecordMapper<'a> {
    pub fn new(shape: &'a RecordShape) -> Self {
        RecordMapper { shape }
    }

    /// Convert one merged row into a record
    ///
    /// `row` is the 1-based sheet row number, used only for error reporting.
    /// Column fields consume text slots left to right; highlight fields take
    /// the row's highlight slot. Text slots beyond the column fields are
    /// ignored.
    pub fn map_row(&self, row: usize, cells: &[MergedCell]) -> Result<Record> {
        let mut texts = cells.iter().filter_map(|c| match c {
            MergedCell::Text(t) => Some(t.as_str()),
            MergedCell::Highlight(_) => None,
        });
        let highlight = cells.iter().find_map(|c| match c {
            MergedCell::Highlight(h) => Some(*h),
            MergedCell::Text(_) => None,
        });

        let mut fields = Vec::with_capacity(self.shape.fields().len());
        for spec in self.shape.fields() {
            let value = match spec.source {
                FieldSource::Column => {
                    let text = texts.next().ok_or_else(|| Error::MissingValue {
                        row,
                        field: spec.name.clone(),
                    })?;
                    FieldValue::parse(text, &spec.field_type).ok_or_else(|| {
                        Error::RowConversion {
                            row,
                            field: spec.name.clone(),
                            expected: spec.field_type.clone(),
                            value: text.to_string(),
                        }
                    })?
                }
                FieldSource::Highlight => {
                    let flag = highlight.ok_or_else(|| Error::MissingValue {
                        row,
                        field: spec.name.clone(),
                    })?;
                    FieldValue::Boolean(flag)
                }
            };
            fields.push((spec.name.clone(), value));
        }

        Ok(Record { fields })
    }
}
