
use indexmap::IndexMap;
use log::{LevelFilter, error, info, warn};
use std::time::Instant;

use callcompare::cli::compare::{CompareSettings, check_compare_settings};
use callcompare::cli::core::{Commands, get_cli};
use callcompare::data_types::caller_panel::CompareError;
use callcompare::data_types::intersection_lattice::IntersectionLattice;
use callcompare::data_types::variants::{VariantError, VariantRecord, VariantType};
use callcompare::parsing::truth_log::load_truth_log;
use callcompare::parsing::variant_loader::load_variant_file;
use callcompare::set_comparator::{CompareConfigBuilder, build_type_lookup, compare_callers};
use callcompare::truth_validator::{TruthIndex, validate_private_calls};
use callcompare::util::json_io::save_json;
use callcompare::writers::intersection_members::IntersectionMembersWriter;
use callcompare::writers::intersection_summary::{ALL_TYPES, IntersectionSummaryWriter};
use callcompare::writers::membership_table::MembershipTableWriter;
use callcompare::writers::validation_summary::ValidationSummaryWriter;

/// Malformed content is a data error, anything else while loading is treated as I/O
fn load_exit_code(e: &anyhow::Error) -> i32 {
    if e.downcast_ref::<VariantError>().is_some() {
        exitcode::DATAERR
    } else {
        exitcode::IOERR
    }
}

fn run_compare(settings: CompareSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_compare_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // create the primary output folder
    info!("Creating output folder at {:?}...", settings.output_folder);
    if let Err(e) = std::fs::create_dir_all(&settings.output_folder) {
        error!("Error while creating output folder: {e}");
        std::process::exit(exitcode::IOERR);
    }

    // save the CLI options
    let cli_json = settings.output_folder.join("settings.json");
    info!("Saving CLI options to {cli_json:?}...");
    if let Err(e) = save_json(&settings, &cli_json) {
        error!("Error while saving CLI options: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    // load every call set fully into memory
    info!("Loading call sets...");
    let mut callers: IndexMap<String, Vec<VariantRecord>> = Default::default();
    for (label, input_fn) in settings.caller_labels.iter().zip(settings.input_filenames.iter()) {
        match load_variant_file(input_fn) {
            Ok(records) => {
                info!("\t{label}: {} variants", records.len());
                callers.insert(label.clone(), records);
            },
            Err(e) => {
                error!("Error while loading {input_fn:?}: {e:#}");
                std::process::exit(load_exit_code(&e));
            }
        }
    }

    let truth_index = settings.truth_log_filename.as_deref().map(|truth_fn| {
        info!("Loading truth log...");
        match load_truth_log(truth_fn) {
            Ok(mutations) => {
                let index = TruthIndex::new(&mutations);
                info!("\t{} truth mutations at {} positions", mutations.len(), index.num_positions());
                index
            },
            Err(e) => {
                error!("Error while loading truth log: {e:#}");
                std::process::exit(load_exit_code(&e));
            }
        }
    });

    // the full comparison always keeps identifiers when we need private calls for validation
    let retain_ids = !settings.counts_only;
    let mut comparisons: Vec<(String, Option<VariantType>)> = vec![(ALL_TYPES.to_string(), None)];
    comparisons.extend(settings.variant_types.iter().map(|&vt| (vt.to_string(), Some(vt))));

    let mut members_writer = if retain_ids {
        let out_fn = settings.output_folder.join("intersection_members.tsv.gz");
        match IntersectionMembersWriter::new(&out_fn) {
            Ok(w) => Some(w),
            Err(e) => {
                error!("Error while opening identifier writer: {e:#}");
                std::process::exit(exitcode::IOERR);
            }
        }
    } else {
        None
    };

    info!("Comparing call sets...");
    let mut summary_writer = IntersectionSummaryWriter::default();
    let mut full_lattice: Option<IntersectionLattice> = None;
    for (label, type_filter) in comparisons.into_iter() {
        let keep_ids = retain_ids || (type_filter.is_none() && truth_index.is_some());
        let compare_config = match CompareConfigBuilder::default()
            .variant_type(type_filter)
            .retain_ids(keep_ids)
            .build() {
            Ok(cc) => cc,
            Err(e) => {
                error!("Error while building compare config: {e:?}");
                std::process::exit(exitcode::SOFTWARE);
            }
        };

        let lattice = match compare_callers(&callers, compare_config) {
            Ok(l) => l,
            Err(CompareError::EmptyComparisonInput) => {
                warn!("\t{label}: no variants in any call set, reporting no data");
                summary_writer.add_no_data(&label);
                continue;
            },
            Err(e) => {
                error!("Error while comparing {label} variants: {e}");
                std::process::exit(exitcode::SOFTWARE);
            }
        };
        info!("\t{label}: {} unique variants in {} groups", lattice.union_size(), lattice.groups().len());

        summary_writer.add_lattice(&label, &lattice);
        if let Some(writer) = members_writer.as_mut() {
            if let Err(e) = writer.write_lattice(&label, &lattice) {
                error!("Error while writing identifiers: {e:#}");
                std::process::exit(exitcode::IOERR);
            }
        }

        if type_filter.is_none() {
            full_lattice = Some(lattice);
        }
    }

    // now write things
    let summary_fn = settings.output_folder.join("intersection_summary.tsv");
    info!("Saving intersection summary to {summary_fn:?}...");
    if let Err(e) = summary_writer.write_summary(&summary_fn) {
        error!("Error while saving intersection summary: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    if let Some(writer) = members_writer {
        if let Err(e) = writer.finish() {
            error!("Error while saving identifiers: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    if let (true, Some(lattice)) = (retain_ids, full_lattice.as_ref()) {
        let membership_fn = settings.output_folder.join("membership.tsv.gz");
        info!("Saving membership table to {membership_fn:?}...");
        let type_lookup = build_type_lookup(&callers);
        let result = lattice.membership_rows(&type_lookup)
            .and_then(|rows| {
                let mut writer = MembershipTableWriter::new(&membership_fn, lattice.callers())?;
                writer.write_rows(&rows)?;
                writer.finish()
            });
        if let Err(e) = result {
            error!("Error while saving membership table: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // audit the private calls of each caller
    if let Some(truth) = truth_index.as_ref() {
        match full_lattice.as_ref() {
            Some(lattice) => {
                info!("Validating private calls against truth log...");
                let mut validation_writer = ValidationSummaryWriter::default();
                for (caller_index, label) in lattice.callers().iter().enumerate() {
                    let result = match validate_private_calls(lattice.private_ids(caller_index), truth) {
                        Ok(r) => r,
                        Err(e) => {
                            error!("Error while validating private calls for {label}: {e}");
                            std::process::exit(exitcode::DATAERR);
                        }
                    };

                    match result.percent_real() {
                        Some(percent) => info!("\t{label}: {} / {} private calls in truth ({percent:.2}%)", result.real(), result.total()),
                        None => info!("\t{label}: no private calls, validation not applicable")
                    };
                    validation_writer.add_result(label.clone(), result);
                }

                let validation_fn = settings.output_folder.join("private_validation.tsv");
                info!("Saving private call validation to {validation_fn:?}...");
                if let Err(e) = validation_writer.write_summary(&validation_fn) {
                    error!("Error while saving validation summary: {e:#}");
                    std::process::exit(exitcode::IOERR);
                }

                if retain_ids {
                    let detail_fn = settings.output_folder.join("private_calls.tsv.gz");
                    if let Err(e) = validation_writer.write_details(&detail_fn) {
                        error!("Error while saving private call details: {e:#}");
                        std::process::exit(exitcode::IOERR);
                    }
                }
            },
            None => {
                warn!("No variants to compare, skipping truth validation");
            }
        };
    }

    info!("Comparison completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Compare(settings) => {
            run_compare(*settings);
        }
    }

    info!("Process finished successfully.");
}
