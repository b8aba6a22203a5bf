/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Parser for the three-column ground-truth mutation log
pub mod truth_log;
/// Parser for flat tab-delimited variant call files
pub mod variant_loader;
