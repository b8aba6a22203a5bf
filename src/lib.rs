
/// Command line interface functionality
pub mod cli;
/// Contains the shared data types: records, caller panels, and lattices
pub mod data_types;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Core logic for building the exclusive intersection lattice of a caller panel
pub mod set_comparator;
/// Validates caller-private calls against a ground-truth log
pub mod truth_validator;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
