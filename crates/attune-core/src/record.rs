use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::dimension::Dimension;

/// A decoded cell, tagged with the type the record source inferred for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl FieldValue {
    /// The numeric value, if this cell was tagged as a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::Null => Ok(()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One catalog entry.
///
/// `name` and `artist` together identify the song; the filter never
/// deduplicates on them. Every other column of the source row lives in
/// `fields`, keyed by column name. A column the row did not carry is simply
/// absent from the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub artist: String,

    /// Artwork reference for display, usually a URI.
    pub album_art_url: Option<String>,

    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    #[must_use]
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            album_art_url: None,
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_feature(self, dimension: Dimension, value: f64) -> Self {
        self.with_field(dimension.column(), FieldValue::Number(value))
    }

    #[must_use]
    pub fn with_album_art(mut self, url: impl Into<String>) -> Self {
        self.album_art_url = Some(url.into());
        self
    }

    /// The raw cell for a column, if the row carried it.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// The value of a feature dimension, only when present and numeric.
    #[must_use]
    pub fn number(&self, dimension: Dimension) -> Option<f64> {
        self.field(dimension.column()).and_then(FieldValue::as_number)
    }

    /// The identity pair `(name, artist)`.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = Record::new("So What", "Miles Davis")
            .with_feature(Dimension::Tempo, 136.0)
            .with_field("genre", "jazz")
            .with_album_art("https://example.com/kind-of-blue.jpg");

        assert_eq!(record.key(), ("So What", "Miles Davis"));
        assert_eq!(record.number(Dimension::Tempo), Some(136.0));
        assert_eq!(record.field("genre"), Some(&FieldValue::Text("jazz".to_string())));
        assert_eq!(
            record.album_art_url.as_deref(),
            Some("https://example.com/kind-of-blue.jpg")
        );
    }

    #[test]
    fn test_number_requires_numeric_tag() {
        let record = Record::new("a", "b")
            .with_field("tempo", "120")
            .with_field("energy", FieldValue::Null)
            .with_field("valence", FieldValue::Bool(true));

        assert_eq!(record.number(Dimension::Tempo), None);
        assert_eq!(record.number(Dimension::Energy), None);
        assert_eq!(record.number(Dimension::Valence), None);
        assert_eq!(record.number(Dimension::Danceability), None);
    }

    #[test]
    fn test_field_value_serializes_untagged() {
        let json = serde_json::to_string(&vec![
            FieldValue::Number(0.5),
            FieldValue::Bool(false),
            FieldValue::Text("x".to_string()),
            FieldValue::Null,
        ])
        .unwrap();
        assert_eq!(json, r#"[0.5,false,"x",null]"#);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Number(120.5).to_string(), "120.5");
        assert_eq!(FieldValue::Text("pop".to_string()).to_string(), "pop");
        assert_eq!(FieldValue::Null.to_string(), "");
    }
}
