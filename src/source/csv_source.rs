use std::borrow::Cow;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::{CellValue, RawTable};
use crate::error::{ChartError, ChartResult};

use super::EncodingFallback;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn read_table_from_path(
    path: impl AsRef<Path>,
    fallback: EncodingFallback,
) -> ChartResult<RawTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read csv source");
    read_table_from_bytes(&bytes, fallback)
}

/// Decodes comma-separated text into a [`RawTable`].
///
/// Records with more fields than the header are skipped; shorter ones are
/// kept and left for the normalizer to account for.
pub fn read_table_from_bytes(bytes: &[u8], fallback: EncodingFallback) -> ChartResult<RawTable> {
    let text = decode_text(bytes, fallback)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(map_csv_error)?
        .iter()
        .map(str::to_owned)
        .collect();
    let width = headers.len();
    let mut table = RawTable::new(headers);

    let mut skipped = 0_usize;
    for (record_index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                skipped += 1;
                debug!(record_index, error = %err, "skipping unreadable csv record");
                continue;
            }
        };
        if record.len() > width {
            skipped += 1;
            debug!(
                record_index,
                fields = record.len(),
                expected = width,
                "skipping csv record with extra fields"
            );
            continue;
        }
        table.push_row(record.iter().map(parse_cell));
    }

    if skipped > 0 {
        warn!(skipped, kept = table.row_count(), "skipped malformed csv records");
    }
    Ok(table)
}

/// Strips a UTF-8 BOM and decodes, falling back to Latin-1 when allowed.
pub fn decode_text(bytes: &[u8], fallback: EncodingFallback) -> ChartResult<Cow<'_, str>> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(err) => match fallback {
            EncodingFallback::Utf8Only => Err(ChartError::InvalidData(format!(
                "input is not valid utf-8: {err}"
            ))),
            EncodingFallback::Utf8ThenLatin1 => {
                warn!(valid_up_to = err.valid_up_to(), "input is not utf-8; decoding as latin-1");
                Ok(Cow::Owned(body.iter().copied().map(char::from).collect()))
            }
        },
    }
}

fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(integer) = trimmed.parse::<i64>() {
        return CellValue::Integer(integer);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        return CellValue::Float(float);
    }
    CellValue::Text(raw.to_owned())
}

fn map_csv_error(err: csv::Error) -> ChartError {
    ChartError::InvalidData(format!("failed to read csv: {err}"))
}
