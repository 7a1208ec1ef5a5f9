//! Single-line CSV records.
//!
//! Reading flattens every record of the input into one token list, so a
//! value pasted over several lines behaves like one comma separated line.
//! Writing produces one RFC 4180 record with quoting only where a field
//! contains a comma, a quote, or a line break.

use csv::{ReaderBuilder, WriterBuilder};

/// Splits text into CSV fields, flattening all records in order.
///
/// Returns `None` if the text is not readable as CSV.
#[must_use]
pub fn tokenize(text: &str) -> Option<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut fields = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => fields.extend(record.iter().map(str::to_string)),
            Err(err) => {
                tracing::debug!(%err, "text is not readable as csv");
                return None;
            }
        }
    }
    Some(fields)
}

/// Writes fields as one CSV record with trailing whitespace trimmed.
///
/// No fields produce empty text.
#[must_use]
pub fn stringify<I, T>(fields: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let fields: Vec<T> = fields.into_iter().collect();
    if fields.is_empty() {
        return String::new();
    }

    match write_record(fields) {
        Ok(line) => line.trim_end().to_string(),
        Err(err) => {
            tracing::warn!(%err, "failed to write csv record");
            String::new()
        }
    }
}

fn write_record<T: AsRef<[u8]>>(fields: Vec<T>) -> csv::Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
