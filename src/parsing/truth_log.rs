
use anyhow::Context;
use log::debug;
use std::io::Read;
use std::path::Path;

use crate::data_types::truth_mutation::TruthMutation;
use crate::data_types::variants::VariantError;
use crate::parsing::variant_loader::{COMMENT_CHAR, convert_csv_error};
use crate::util::delimited_io::open_input;

/// Number of required columns: POS, REF, ALT
pub const TRUTH_COLUMNS: usize = 3;

/// Loads the ground-truth mutation log, a headerless 3-column TSV.
/// # Arguments
/// * `filename` - the truth log to load, gzip compressed if it ends with .gz
/// # Errors
/// * if the file cannot be opened or read
/// * if any row has fewer than 3 fields or a non-integer position
pub fn load_truth_log(filename: &Path) -> anyhow::Result<Vec<TruthMutation>> {
    debug!("Loading truth log from {filename:?}...");
    let reader = open_input(filename)?;
    let mutations = read_truth_log(reader)
        .with_context(|| format!("Error while loading truth log from {filename:?}:"))?;
    debug!("Loaded {} truth mutations from {filename:?}", mutations.len());
    Ok(mutations)
}

/// Parses truth mutations from any reader.
pub fn read_truth_log<R: Read>(reader: R) -> anyhow::Result<Vec<TruthMutation>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(COMMENT_CHAR))
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut mutations = vec![];
    for result in csv_reader.records() {
        let row = result.map_err(convert_csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if row.len() < TRUTH_COLUMNS {
            return Err(VariantError::MalformedRecord {
                line,
                reason: format!("expected {TRUTH_COLUMNS} tab-separated fields, found {}", row.len())
            }.into());
        }

        let position: u64 = row[0].parse()
            .map_err(|_e| VariantError::MalformedRecord {
                line,
                reason: format!("position {:?} is not an integer", &row[0])
            })?;
        mutations.push(TruthMutation::new(position, row[1].to_string(), row[2].to_string()));
    }
    Ok(mutations)
}
