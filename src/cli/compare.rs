
use anyhow::{bail, ensure};
use clap::Args;
use itertools::Itertools;
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use strum::IntoEnumIterator;

use crate::cli::core::{check_optional_filename, check_required_filename, AFTER_HELP, FULL_VERSION};
use crate::data_types::caller_panel::MAX_CALLERS;
use crate::data_types::intersection_lattice::CALLER_JOIN;
use crate::data_types::variants::VariantType;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct CompareSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    callcompare_version: String,

    /// Input variant call file (tab-delimited, 10 columns), one per caller
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_filenames: Vec<PathBuf>,

    /// The caller label to use for the corresponding input [default: "caller_#"]
    #[clap(short = 'l')]
    #[clap(long = "label")]
    #[clap(value_name = "LABEL")]
    #[clap(help_heading = Some("Input/Output"))]
    pub caller_labels: Vec<String>,

    /// Ground-truth mutation log (POS, REF, ALT) used to validate caller-private calls
    #[clap(short = 't')]
    #[clap(long = "truth-log")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub truth_log_filename: Option<PathBuf>,

    /// Output directory containing all summary tables
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_folder: PathBuf,

    /// Variant type to compare separately, may be repeated [default: all types]
    #[clap(long = "variant-type")]
    #[clap(value_name = "TYPE")]
    #[clap(help_heading = Some("Compare parameters"))]
    pub variant_types: Vec<VariantType>,

    /// Disables the per-identifier outputs, keeping only counts
    #[clap(long = "counts-only")]
    #[clap(help_heading = Some("Compare parameters"))]
    pub counts_only: bool,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_compare_settings(mut settings: CompareSettings) -> anyhow::Result<CompareSettings> {
    // hard code the version in
    settings.callcompare_version = FULL_VERSION.clone();
    info!("callcompare version: {:?}", &settings.callcompare_version);
    info!("Sub-command: compare");
    info!("Inputs:");

    ensure!(settings.input_filenames.len() >= 2, "At least two inputs are required for a comparison");
    ensure!(settings.input_filenames.len() <= MAX_CALLERS, "At most {MAX_CALLERS} inputs are supported");
    ensure!(
        settings.caller_labels.len() <= settings.input_filenames.len(),
        "More labels ({}) than inputs ({})", settings.caller_labels.len(), settings.input_filenames.len()
    );

    // check the inputs and corresponding labels
    for (i, input_fn) in settings.input_filenames.iter().enumerate() {
        check_required_filename(input_fn, format!("Input #{i}").as_str())?;
        info!("\tInput #{i}: {input_fn:?}");

        if settings.caller_labels.len() <= i {
            settings.caller_labels.push(format!("caller_{i}"));
        }
        let label = &settings.caller_labels[i];
        if label.is_empty() || label.contains(char::is_whitespace) || label.contains(CALLER_JOIN) {
            bail!("Caller label {label:?} must be non-empty and cannot contain whitespace or {CALLER_JOIN:?}");
        }
        info!("\t\tCaller label: {label:?}");
    }
    if let Some(dup) = settings.caller_labels.iter().duplicates().next() {
        bail!("Duplicate caller label: {dup:?}");
    }

    check_optional_filename(settings.truth_log_filename.as_deref(), "Truth log")?;
    if let Some(truth_fn) = settings.truth_log_filename.as_deref() {
        info!("\tTruth log: {truth_fn:?}");
    } else {
        info!("\tTruth log: None");
    }

    // outputs
    info!("Outputs:");
    info!("\tOutput folder: {:?}", &settings.output_folder);

    // empty is a sentinel for everything
    info!("Compare parameters:");
    if settings.variant_types.is_empty() {
        settings.variant_types = VariantType::iter().collect();
    }
    settings.variant_types = settings.variant_types.iter().copied().sorted().dedup().collect();
    info!("\tVariant types: {}", settings.variant_types.iter().join(", "));
    info!("\tIdentifier outputs: {}", if settings.counts_only { "DISABLED" } else { "ENABLED" });

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_settings() -> CompareSettings {
        CompareSettings {
            input_filenames: vec![
                PathBuf::from("test_data/callers/caller_a.tsv"),
                PathBuf::from("test_data/callers/caller_b.tsv"),
                PathBuf::from("test_data/callers/caller_c.tsv"),
            ],
            output_folder: PathBuf::from("unused"),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_filled() {
        let mut settings = example_settings();
        settings.caller_labels = vec!["bt".to_string()];
        let settings = check_compare_settings(settings).unwrap();
        assert_eq!(settings.caller_labels, vec!["bt", "caller_1", "caller_2"]);
        assert_eq!(settings.variant_types, vec![
            VariantType::Snv, VariantType::Insertion, VariantType::Deletion, VariantType::Complex
        ]);
        assert!(!settings.callcompare_version.is_empty());
    }

    #[test]
    fn test_variant_types_dedup() {
        let mut settings = example_settings();
        settings.variant_types = vec![VariantType::Deletion, VariantType::Snv, VariantType::Deletion];
        let settings = check_compare_settings(settings).unwrap();
        assert_eq!(settings.variant_types, vec![VariantType::Snv, VariantType::Deletion]);
    }

    #[test]
    fn test_bad_settings() {
        let mut settings = example_settings();
        settings.input_filenames.truncate(1);
        assert!(check_compare_settings(settings).is_err());

        let mut settings = example_settings();
        settings.caller_labels = vec!["bt".to_string(), "bt".to_string()];
        assert!(check_compare_settings(settings).is_err());

        let mut settings = example_settings();
        settings.caller_labels = vec!["bt&hc".to_string()];
        assert!(check_compare_settings(settings).is_err());

        let mut settings = example_settings();
        settings.truth_log_filename = Some(PathBuf::from("test_data/missing_truth.tsv"));
        assert!(check_compare_settings(settings).is_err());

        let mut settings = example_settings();
        settings.input_filenames.push(PathBuf::from("test_data/callers/missing.tsv"));
        assert!(check_compare_settings(settings).is_err());
    }
}
