//! Tab-separated catalog decoding.
//!
//! The first row names the columns. `name` and `artist` are kept verbatim as
//! the identity of a record and `album_art_url` as its artwork reference;
//! every other cell goes through [`infer`]. Short rows leave their trailing
//! columns absent and cells beyond the header are dropped.

use std::collections::BTreeMap;

use attune_core::Record;
use csv::ReaderBuilder;

use crate::autotype::infer;
use crate::error::SourceResult;

const NAME_COLUMN: &str = "name";
const ARTIST_COLUMN: &str = "artist";
const ART_COLUMN: &str = "album_art_url";

/// Decode a whole TSV document into records, in file order.
pub fn parse_records(text: &str) -> SourceResult<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::new("", "");
        let mut fields = BTreeMap::new();

        for (column, cell) in headers.iter().zip(row.iter()) {
            match column.as_str() {
                NAME_COLUMN => record.name = cell.to_string(),
                ARTIST_COLUMN => record.artist = cell.to_string(),
                ART_COLUMN => {
                    let url = cell.trim();
                    record.album_art_url = (!url.is_empty()).then(|| url.to_string());
                }
                _ => {
                    fields.insert(column.clone(), infer(cell));
                }
            }
        }

        record.fields = fields;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use attune_core::{is_usable, Dimension, FieldValue};

    const HEADER: &str =
        "name\tartist\ttempo\tdanceability\tenergy\tvalence\tacousticness\tinstrumentalness\talbum_art_url";

    fn doc(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_parse_complete_row() {
        let text = doc(&["Blue\tJoni\t120.5\t0.5\t0.4\t0.3\t0.9\t0.01\thttps://img/blue.jpg"]);
        let records = parse_records(&text).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.key(), ("Blue", "Joni"));
        assert_eq!(record.number(Dimension::Tempo), Some(120.5));
        assert_eq!(record.number(Dimension::Acousticness), Some(0.9));
        assert_eq!(record.album_art_url.as_deref(), Some("https://img/blue.jpg"));
        assert!(is_usable(record));
    }

    #[test]
    fn test_rows_keep_file_order() {
        let text = doc(&[
            "B\tx\t1\t0\t0\t0\t0\t0\t",
            "A\tx\t2\t0\t0\t0\t0\t0\t",
            "C\tx\t3\t0\t0\t0\t0\t0\t",
        ]);
        let names: Vec<String> = parse_records(&text)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_empty_cell_is_null_and_unusable() {
        let text = doc(&["Song\tArtist\t120\t0.5\t\t0.5\t0.5\t0.5\t"]);
        let records = parse_records(&text).unwrap();
        assert_eq!(records[0].field("energy"), Some(&FieldValue::Null));
        assert_eq!(records[0].album_art_url, None);
        assert!(!is_usable(&records[0]));
    }

    #[test]
    fn test_short_row_leaves_columns_absent() {
        let text = doc(&["Song\tArtist\t120\t0.5"]);
        let records = parse_records(&text).unwrap();
        assert_eq!(records[0].field("energy"), None);
        assert_eq!(records[0].number(Dimension::Danceability), Some(0.5));
        assert!(!is_usable(&records[0]));
    }

    #[test]
    fn test_text_feature_is_unusable() {
        let text = doc(&["Song\tArtist\tfast\t0.5\t0.5\t0.5\t0.5\t0.5\t"]);
        let records = parse_records(&text).unwrap();
        assert_eq!(
            records[0].field("tempo"),
            Some(&FieldValue::Text("fast".to_string()))
        );
        assert!(!is_usable(&records[0]));
    }

    #[test]
    fn test_numeric_name_stays_text() {
        let text = doc(&["1999\tPrince\t119\t0.5\t0.5\t0.5\t0.5\t0.5\t"]);
        let records = parse_records(&text).unwrap();
        assert_eq!(records[0].name, "1999");
        assert_eq!(records[0].field("name"), None);
    }

    #[test]
    fn test_extra_columns_are_inferred() {
        let text = "name\tartist\tpopularity\texplicit\nSong\tArtist\t87\ttrue\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records[0].field("popularity"), Some(&FieldValue::Number(87.0)));
        assert_eq!(records[0].field("explicit"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_missing_feature_columns_is_not_an_error() {
        let text = "name\tartist\nSong\tArtist\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!is_usable(&records[0]));
    }

    #[test]
    fn test_header_only_yields_no_records() {
        assert!(parse_records(HEADER).unwrap().is_empty());
        assert!(parse_records("").unwrap().is_empty());
    }
}
