//! Record validator.
//!
//! A record is usable only when every feature dimension is present and tagged
//! as a number. Distance against anything else is undefined, so the filter
//! gates on this check before comparing any value.

use crate::dimension::Dimension;
use crate::record::Record;

/// Whether `record` carries a numeric value for every feature dimension.
#[must_use]
pub fn is_usable(record: &Record) -> bool {
    Dimension::ALL
        .iter()
        .all(|&dim| record.number(dim).is_some())
}

/// The dimensions for which `record` has no numeric value.
#[must_use]
pub fn missing_dimensions(record: &Record) -> Vec<Dimension> {
    Dimension::ALL
        .into_iter()
        .filter(|&dim| record.number(dim).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    fn complete() -> Record {
        Dimension::ALL
            .into_iter()
            .fold(Record::new("Song", "Artist"), |r, d| r.with_feature(d, 0.5))
    }

    #[test]
    fn test_complete_record_is_usable() {
        let record = complete();
        assert!(is_usable(&record));
        assert!(missing_dimensions(&record).is_empty());
    }

    #[test]
    fn test_absent_field_is_unusable() {
        let mut record = complete();
        record.fields.remove("energy");
        assert!(!is_usable(&record));
        assert_eq!(missing_dimensions(&record), vec![Dimension::Energy]);
    }

    #[test]
    fn test_non_numeric_tags_are_unusable() {
        for value in [
            FieldValue::Text("0.5".to_string()),
            FieldValue::Bool(true),
            FieldValue::Null,
        ] {
            let record = complete().with_field("valence", value);
            assert!(!is_usable(&record));
        }
    }

    #[test]
    fn test_nan_is_tagged_numeric() {
        let record = complete().with_feature(Dimension::Tempo, f64::NAN);
        assert!(is_usable(&record));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let record = complete().with_field("genre", FieldValue::Null);
        assert!(is_usable(&record));
    }
}
