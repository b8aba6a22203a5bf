
use serde::Serialize;
use std::path::Path;

use crate::data_types::validation_result::ValidationResult;
use crate::util::delimited_io::open_delimited_writer;

/// Accumulates private-call validation results per caller
#[derive(Default)]
pub struct ValidationSummaryWriter {
    /// Caller label paired with its results, in the order added
    results: Vec<(String, ValidationResult)>
}

/// Contains all the data written to each row of the summary file
#[derive(Serialize)]
struct ValidationSummaryRow<'a> {
    /// Caller label
    caller: &'a str,
    /// Number of calls private to this caller
    private_total: u64,
    /// Number of private calls found in the truth log
    private_real: u64,
    /// 100 * real / total; empty when there are no private calls
    percent_real: Option<f64>
}

/// One private call with its truth decision
#[derive(Serialize)]
struct ValidationDetailRow<'a> {
    caller: &'a str,
    vid: &'a str,
    truth_match: &'a str
}

impl ValidationSummaryWriter {
    /// Adds the results for one caller
    pub fn add_result(&mut self, caller: String, result: ValidationResult) {
        self.results.push((caller, result));
    }

    /// Will write the per-caller summary out to the given file path
    /// # Arguments
    /// * `filename` - the filename for the output (tsv/csv)
    pub fn write_summary(&self, filename: &Path) -> anyhow::Result<()> {
        let mut csv_writer = open_delimited_writer(filename, true)?;
        for (caller, result) in self.results.iter() {
            csv_writer.serialize(ValidationSummaryRow {
                caller,
                private_total: result.total(),
                private_real: result.real(),
                percent_real: result.percent_real()
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Will write one row per private call to the given file path
    /// # Arguments
    /// * `filename` - the filename for the output (tsv/csv, optional .gz)
    pub fn write_details(&self, filename: &Path) -> anyhow::Result<()> {
        let mut csv_writer = open_delimited_writer(filename, true)?;
        for (caller, result) in self.results.iter() {
            for outcome in result.outcomes().iter() {
                csv_writer.serialize(ValidationDetailRow {
                    caller,
                    vid: outcome.vid.as_str(),
                    truth_match: outcome.truth_match.as_ref()
                })?;
            }
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::validation_result::{PrivateCallOutcome, TruthMatch};
    use crate::data_types::variant_id::VariantId;

    #[test]
    fn test_write_validation() {
        let mut writer = ValidationSummaryWriter::default();
        writer.add_result("bt".to_string(), ValidationResult::new(vec![
            PrivateCallOutcome { vid: VariantId::from("1_1_A_C"), truth_match: TruthMatch::Match },
            PrivateCallOutcome { vid: VariantId::from("1_2_A_C"), truth_match: TruthMatch::NoTruthAtPosition },
        ]));
        writer.add_result("hc".to_string(), ValidationResult::default());

        let summary_fn = std::env::temp_dir().join(format!("callcompare_validation_{}.tsv", std::process::id()));
        writer.write_summary(&summary_fn).unwrap();
        let contents = std::fs::read_to_string(&summary_fn).unwrap();
        assert_eq!(contents, "caller\tprivate_total\tprivate_real\tpercent_real\nbt\t2\t1\t50.0\nhc\t0\t0\t\n");
        std::fs::remove_file(&summary_fn).unwrap();

        let detail_fn = std::env::temp_dir().join(format!("callcompare_validation_detail_{}.tsv", std::process::id()));
        writer.write_details(&detail_fn).unwrap();
        let contents = std::fs::read_to_string(&detail_fn).unwrap();
        assert_eq!(contents, "caller\tvid\ttruth_match\nbt\t1_1_A_C\tMATCH\nbt\t1_2_A_C\tNO_TRUTH\n");
        std::fs::remove_file(&detail_fn).unwrap();
    }
}
