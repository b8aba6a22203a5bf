
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::data_types::intersection_lattice::IntersectionLattice;
use crate::util::delimited_io::open_delimited_writer;

/// Writes every identifier along with the caller combination it belongs to
pub struct IntersectionMembersWriter {
    /// Handle on the writer
    csv_writer: csv::Writer<Box<dyn Write>>
}

#[derive(Serialize)]
struct MemberRow<'a> {
    /// The variant type compared, or ALL
    variant_type: &'a str,
    /// Member callers joined by "&"
    callers: &'a str,
    /// The variant identifier
    vid: &'a str
}

impl IntersectionMembersWriter {
    /// Creates a new writer
    /// # Arguments
    /// * `filename` - path to the filename that will get opened, must be .csv/.tsv with optional .gz
    pub fn new(filename: &Path) -> anyhow::Result<Self> {
        let csv_writer = open_delimited_writer(filename, true)?;
        Ok(Self {
            csv_writer
        })
    }

    /// Writes one row per identifier, groups in lattice order
    /// # Arguments
    /// * `variant_type` - the label for this comparison
    /// * `lattice` - the comparison results, which must have been built with identifiers retained
    pub fn write_lattice(&mut self, variant_type: &str, lattice: &IntersectionLattice) -> anyhow::Result<()> {
        for group in lattice.groups().iter() {
            let callers = group.label();
            for vid in group.ids().iter() {
                self.csv_writer.serialize(MemberRow {
                    variant_type,
                    callers: &callers,
                    vid: vid.as_str()
                })?;
            }
        }
        Ok(())
    }

    /// Flushes everything to disk
    pub fn finish(mut self) -> anyhow::Result<()> {
        self.csv_writer.flush()?;
        Ok(())
    }
}
