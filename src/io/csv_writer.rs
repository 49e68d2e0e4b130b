use csv::{Terminator, WriterBuilder};

use super::error::IoError;
use crate::domain::Record;

/// Render records as CSV text.
///
/// With `fields`, exactly those columns are written in the given order and a
/// record lacking one gets an empty cell. Without `fields`, the header is the
/// first record's keys: later records fill those columns and any key the
/// first record lacks is dropped. Empty input (or an empty field list)
/// renders as an empty string.
pub fn to_csv(records: &[Record], fields: Option<&[String]>) -> Result<String, IoError> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let header: Vec<&str> = match fields {
        Some(fields) => fields.iter().map(String::as_str).collect(),
        None => first.keys().map(String::as_str).collect(),
    };
    if header.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&header)?;
    for record in records {
        writer.write_record(
            header
                .iter()
                .map(|field| record.get(*field).map(String::as_str).unwrap_or("")),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| IoError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record_from_pairs;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_renders_empty_string() {
        assert_eq!(to_csv(&[], None).unwrap(), "");
        assert_eq!(to_csv(&[], Some(fields(&["name"]).as_slice())).unwrap(), "");
    }

    #[test]
    fn header_comes_from_first_record() {
        let records = vec![
            record_from_pairs([("name", "Acme"), ("city", "Lima")]),
            record_from_pairs([("city", "Quito"), ("name", "Beta")]),
        ];

        let csv = to_csv(&records, None).unwrap();
        assert_eq!(csv, "name,city\nAcme,Lima\nBeta,Quito\n");
    }

    #[test]
    fn heterogeneous_records_follow_first_record_header() {
        let records = vec![
            record_from_pairs([("name", "Acme"), ("city", "Lima")]),
            record_from_pairs([("name", "Beta"), ("phone", "555")]),
        ];

        let csv = to_csv(&records, None).unwrap();
        assert_eq!(csv, "name,city\nAcme,Lima\nBeta,\n");
    }

    #[test]
    fn explicit_fields_select_and_order_columns() {
        let records = vec![
            record_from_pairs([("name", "Acme"), ("city", "Lima"), ("phone", "1")]),
            record_from_pairs([("name", "Beta")]),
        ];

        let csv = to_csv(&records, Some(fields(&["phone", "name"]).as_slice())).unwrap();
        assert_eq!(csv, "phone,name\n1,Acme\n,Beta\n");
    }

    #[test]
    fn empty_field_list_renders_empty_string() {
        let records = vec![record_from_pairs([("name", "Acme")])];
        let none: &[String] = &[];
        assert_eq!(to_csv(&records, Some(none)).unwrap(), "");
    }

    #[test]
    fn quotes_embedded_delimiters_quotes_and_newlines() {
        let records = vec![record_from_pairs([
            ("name", "Acme, Inc."),
            ("note", "say \"hi\""),
            ("address", "Line 1\nLine 2"),
        ])];

        let csv = to_csv(&records, None).unwrap();
        assert_eq!(
            csv,
            "name,note,address\n\"Acme, Inc.\",\"say \"\"hi\"\"\",\"Line 1\nLine 2\"\n"
        );
    }
}
