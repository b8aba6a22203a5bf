
/// Ordered caller enumeration, per-caller identifier sets, and membership masks
pub mod caller_panel;
/// Exclusive-intersection groups produced by the set comparator
pub mod intersection_lattice;
/// Rows of the ground-truth mutation log
pub mod truth_mutation;
/// Results of validating private calls against the truth log
pub mod validation_result;
/// The synthetic `chrom_pos_ref_alt` identifier
pub mod variant_id;
/// Contains variant definition functionality and checks
pub mod variants;
