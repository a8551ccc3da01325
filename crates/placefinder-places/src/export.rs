//! CSV download of a [`DisplayTable`].
//!
//! Layout: a header row whose first cell is blank (the index column),
//! then one row per place. Missing address or website cells are empty.

use crate::assemble::{DisplayTable, COLUMNS};
use crate::error::ExportError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Utf8,
    /// UTF-8 with a leading byte-order mark, for spreadsheet apps that
    /// otherwise guess a legacy code page.
    Utf8Sig,
}

fn parse_encoding(name: &str) -> Result<Encoding, ExportError> {
    match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "utf-8" | "utf8" => Ok(Encoding::Utf8),
        "utf-8-sig" | "utf8-sig" => Ok(Encoding::Utf8Sig),
        _ => Err(ExportError::UnsupportedEncoding(name.to_owned())),
    }
}

// `{:?}` keeps a trailing `.0` on whole numbers.
fn format_float(value: f64) -> String {
    format!("{value:?}")
}

/// Serialize `table` as comma-separated bytes.
///
/// # Errors
///
/// Returns [`ExportError::UnsupportedEncoding`] for anything other than
/// `utf-8` or `utf-8-sig`, and [`ExportError::Csv`] / [`ExportError::Io`]
/// if the writer fails.
pub fn to_csv_bytes(table: &DisplayTable, encoding: &str) -> Result<Vec<u8>, ExportError> {
    let encoding = parse_encoding(encoding)?;

    let mut buffer = Vec::new();
    if encoding == Encoding::Utf8Sig {
        buffer.extend_from_slice(UTF8_BOM);
    }

    let mut writer = csv::Writer::from_writer(buffer);
    writer.write_record(std::iter::once("").chain(COLUMNS))?;
    for row in &table.rows {
        writer.write_record([
            row.index.to_string(),
            row.name.clone(),
            row.address.clone().unwrap_or_default(),
            row.website.clone().unwrap_or_default(),
            format_float(row.latitude),
            format_float(row.longitude),
            format_float(row.distance_km),
        ])?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}
