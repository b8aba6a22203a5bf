
use anyhow::Context;
use log::debug;
use std::io::Read;
use std::path::Path;

use crate::data_types::variants::{OpaqueColumns, VariantError, VariantRecord};
use crate::util::delimited_io::open_input;

/// Number of required columns: CHROM, POS, ID, REF, ALT, QUAL, FILTER, INFO, FORMAT, SAMPLE
pub const VARIANT_COLUMNS: usize = 10;
/// Lines starting with this byte are comments or header lines
pub const COMMENT_CHAR: u8 = b'#';

/// Loads every variant record from a flat tab-delimited file, gzip compressed if it ends with .gz.
/// Any malformed row aborts the entire load.
/// # Arguments
/// * `filename` - the variant file to load
/// # Errors
/// * if the file cannot be opened or read
/// * if any non-comment line is malformed, see [`parse_variant_row`]
pub fn load_variant_file(filename: &Path) -> anyhow::Result<Vec<VariantRecord>> {
    debug!("Loading variants from {filename:?}...");
    let reader = open_input(filename)?;
    let records = read_variants(reader)
        .with_context(|| format!("Error while loading variants from {filename:?}:"))?;
    debug!("Loaded {} variants from {filename:?}", records.len());
    Ok(records)
}

/// Parses variant records from any reader.
/// # Arguments
/// * `reader` - the raw tab-delimited content
pub fn read_variants<R: Read>(reader: R) -> anyhow::Result<Vec<VariantRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false) // header lines are comments, never data
        .comment(Some(COMMENT_CHAR))
        .flexible(true) // width is checked per row so we can report the line
        .quoting(false) // INFO fields may carry quotes
        .from_reader(reader);

    let mut records = vec![];
    for result in csv_reader.records() {
        let row = result.map_err(convert_csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        records.push(parse_variant_row(&row, line)?);
    }
    Ok(records)
}

/// Converts a csv read error into our error type where the content itself is at fault.
/// Invalid UTF-8 in any column becomes a `MalformedRecord`; anything else is passed through.
pub fn convert_csv_error(error: csv::Error) -> anyhow::Error {
    if let csv::ErrorKind::Utf8 { pos, err } = error.kind() {
        let line = pos.as_ref().map(|p| p.line()).unwrap_or_default();
        return VariantError::MalformedRecord {
            line,
            reason: format!("field {} is not valid UTF-8", err.field() + 1)
        }.into();
    }
    error.into()
}

/// Converts one split row into a record.
/// # Arguments
/// * `row` - the tab-split fields
/// * `line` - the 1-based line number, used for error reporting
/// # Errors
/// * if there are fewer than [`VARIANT_COLUMNS`] fields
/// * if POS is not an unsigned integer
/// * if REF or ALT is empty
pub fn parse_variant_row(row: &csv::StringRecord, line: u64) -> Result<VariantRecord, VariantError> {
    if row.len() < VARIANT_COLUMNS {
        return Err(VariantError::MalformedRecord {
            line,
            reason: format!("expected at least {VARIANT_COLUMNS} tab-separated fields, found {}", row.len())
        });
    }

    let position: u64 = row[1].parse()
        .map_err(|_e| VariantError::MalformedRecord {
            line,
            reason: format!("POS {:?} is not an integer", &row[1])
        })?;

    let opaque = OpaqueColumns {
        qual: row[5].to_string(),
        filter: row[6].to_string(),
        info: row[7].to_string(),
        format: row[8].to_string(),
        sample: row[9].to_string()
    };

    VariantRecord::new(
        row[0].to_string(), position, row[2].to_string(),
        row[3].to_string(), row[4].to_string(), opaque
    ).map_err(|e| VariantError::MalformedRecord { line, reason: e.to_string() })
}
