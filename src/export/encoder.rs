//! CSV encoding of flat records.

use crate::domain::error::{ActionboardError, Result};
use crate::domain::ActionRecord;
use csv::{QuoteStyle, Terminator, WriterBuilder};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An ordered list of named, optionally empty string fields.
///
/// The export counterpart of an [`ActionRecord`]: field order is column order
/// and a `None` value is written as an empty field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    fields: Vec<(String, Option<String>)>,
}

impl FlatRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Builder style.
    #[must_use]
    pub fn with(mut self, name: &str, value: Option<String>) -> Self {
        self.fields.push((name.to_string(), value));
        self
    }

    /// Returns a copy with the named field removed.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.fields.retain(|(field, _)| field != name);
        self
    }

    /// Field names in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Value of `name`, `None` when the field is absent or empty.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Flattens the public fields of an action, `id` first.
    #[must_use]
    pub fn from_action(record: &ActionRecord) -> Self {
        Self::new()
            .with("id", Some(record.id.clone()))
            .with(
                "announcementDate",
                Some(record.announcement_date.format(DATE_FORMAT).to_string()),
            )
            .with("ticker", Some(record.ticker.clone()))
            .with("companyName", Some(record.company_name.clone()))
            .with("actionType", Some(record.action_type.name().to_string()))
            .with("actionDetails", Some(record.action_details.clone()))
            .with(
                "effectiveDate",
                Some(record.effective_date.format(DATE_FORMAT).to_string()),
            )
            .with("before", record.value_before.clone())
            .with("after", record.value_after.clone())
    }

    /// Like [`FlatRecord::from_action`] plus the processing columns, which stay
    /// empty for pending records.
    #[must_use]
    pub fn from_processed_action(record: &ActionRecord) -> Self {
        let info = record.status.completion();
        Self::from_action(record)
            .with("processor", info.map(|i| i.processor.clone()))
            .with(
                "processedDate",
                info.map(|i| i.processed_date.format(DATE_FORMAT).to_string()),
            )
            .with("remarks", info.map(|i| i.remarks.clone()))
    }
}

/// Encodes `records` as CSV text.
///
/// Columns are the field names of the first record, in order; later records
/// are projected onto those columns, missing fields becoming empty. The header
/// row is plain, every data field is double-quoted with inner quotes doubled,
/// and rows are separated by CRLF with no trailing line break.
///
/// Returns `Ok(None)` for empty input so the caller can report that there is
/// nothing to export instead of producing a file.
///
/// # Errors
///
/// Returns an error if the in-memory writer fails to flush.
///
/// # Examples
///
/// ```
/// use actionboard::export::{to_csv, FlatRecord};
///
/// let record = FlatRecord::new()
///     .with("ticker", Some("AAPL".to_string()))
///     .with("companyName", Some("Acme, \"Inc.\"".to_string()));
///
/// let csv = to_csv(&[record])?.unwrap();
/// assert_eq!(csv, "ticker,companyName\r\n\"AAPL\",\"Acme, \"\"Inc.\"\"\"");
/// # Ok::<(), actionboard::ActionboardError>(())
/// ```
pub fn to_csv(records: &[FlatRecord]) -> Result<Option<String>> {
    let Some(first) = records.first() else {
        tracing::warn!("no records to encode");
        return Ok(None);
    };

    let _span = tracing::debug_span!("to_csv", rows = records.len()).entered();

    let header: Vec<&str> = first.names().collect();

    let mut buf = Vec::new();
    {
        let mut header_writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(&mut buf);
        header_writer.write_record(&header)?;
        header_writer.flush()?;
    }
    {
        let mut row_writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(&mut buf);
        for record in records {
            row_writer.write_record(header.iter().map(|name| record.get(name).unwrap_or("")))?;
        }
        row_writer.flush()?;
    }

    let mut text = String::from_utf8(buf)
        .map_err(|e| ActionboardError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }

    tracing::debug!(bytes = text.len(), "CSV encoded");
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionType, CompletionInfo, ProcessingStatus};
    use chrono::NaiveDate;

    fn action() -> ActionRecord {
        ActionRecord {
            id: "5".to_string(),
            announcement_date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            ticker: "FB".to_string(),
            company_name: "Meta Platforms, Inc.".to_string(),
            action_type: ActionType::TickerChange,
            action_details: "Company changed ticker from FB to META.".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            value_before: Some("FB".to_string()),
            value_after: Some("META".to_string()),
            status: ProcessingStatus::Pending,
        }
    }

    #[test]
    fn empty_input_encodes_nothing() {
        assert_eq!(to_csv(&[]).unwrap(), None);
    }

    #[test]
    fn header_comes_from_first_record() {
        let first = FlatRecord::new()
            .with("a", Some("1".to_string()))
            .with("b", None);
        let second = FlatRecord::new()
            .with("b", Some("2".to_string()))
            .with("c", Some("ignored".to_string()));

        let csv = to_csv(&[first, second]).unwrap().unwrap();
        assert_eq!(csv, "a,b\r\n\"1\",\"\"\r\n\"\",\"2\"");
    }

    #[test]
    fn newlines_inside_values_are_kept() {
        let record = FlatRecord::new().with("remarks", Some("line one\nline two".to_string()));
        let csv = to_csv(&[record]).unwrap().unwrap();
        assert_eq!(csv, "remarks\r\n\"line one\nline two\"");
    }

    #[test]
    fn id_is_stripped_by_caller() {
        let flat = FlatRecord::from_action(&action()).without("id");
        let names: Vec<_> = flat.names().collect();
        assert_eq!(
            names,
            vec![
                "announcementDate",
                "ticker",
                "companyName",
                "actionType",
                "actionDetails",
                "effectiveDate",
                "before",
                "after"
            ]
        );
        assert_eq!(flat.get("actionType"), Some("Ticker Change"));
    }

    #[test]
    fn processed_columns_follow_status() {
        let pending = FlatRecord::from_processed_action(&action());
        assert_eq!(pending.get("processor"), None);
        assert!(pending.names().any(|n| n == "remarks"));

        let mut done = action();
        done.status = ProcessingStatus::Completed(CompletionInfo {
            processor: "Admin A".to_string(),
            processed_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            remarks: "ok".to_string(),
        });
        let flat = FlatRecord::from_processed_action(&done);
        assert_eq!(flat.get("processor"), Some("Admin A"));
        assert_eq!(flat.get("processedDate"), Some("2024-05-02"));
    }

    #[test]
    fn output_reads_back_with_a_csv_reader() {
        let records = [FlatRecord::from_action(&action()).without("id")];
        let csv = to_csv(&records).unwrap().unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "Meta Platforms, Inc.");
        assert_eq!(&rows[0][7], "META");
    }
}
