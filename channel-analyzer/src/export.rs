//! CSV export of the per-video result set.
//!
//! Columns follow the field order of [`VideoRecord`], with its display names as the header row.

use crate::metrics::VideoRecord;
use eyre::Context;
use std::io::{Read, Write};

/// Writes `records` as CSV, header row first.
pub fn write_csv<W: Write>(writer: W, records: &[VideoRecord]) -> eyre::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(record)
            .with_context(|| format!("write CSV row for video {}", record.id))?;
    }
    // an empty export still gets its header row
    if records.is_empty() {
        csv_writer.write_record(HEADERS)?;
    }
    csv_writer.flush().context("flush CSV output")?;
    Ok(())
}

/// Renders `records` as a CSV document.
pub fn to_csv_string(records: &[VideoRecord]) -> eyre::Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).context("CSV output is not UTF-8")
}

/// Reads back a CSV document produced by [`write_csv`].
pub fn read_csv<R: Read>(reader: R) -> eyre::Result<Vec<VideoRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("read CSV row {}", i + 1)))
        .collect()
}

const HEADERS: [&str; 10] = [
    "Video ID",
    "Title",
    "Published",
    "Views",
    "Likes",
    "Comments",
    "Engagement %",
    "Duration (min)",
    "Thumbnail",
    "URL",
];
