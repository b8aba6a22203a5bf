/*!
# Writers module
Contains the logic for writing the output tables of the compare command.
*/
/// Generates the per-identifier group listing
pub mod intersection_members;
/// Generates the lattice summary file; each line is one caller combination
pub mod intersection_summary;
/// Generates the boolean membership table consumed by overlap charts
pub mod membership_table;
/// Generates the private-call validation summary and details
pub mod validation_summary;
