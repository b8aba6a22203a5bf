
use serde::Serialize;
use std::path::Path;

use crate::data_types::intersection_lattice::IntersectionLattice;
use crate::util::delimited_io::open_delimited_writer;

/// Label used for the comparison over every variant type
pub const ALL_TYPES: &str = "ALL";
/// Caller column value for a comparison that had nothing to compare
pub const NO_DATA: &str = "NO_DATA";

/// Accumulates the lattice of each comparison and writes them out as one table
#[derive(Default)]
pub struct IntersectionSummaryWriter {
    rows: Vec<IntersectionSummaryRow>
}

/// Contains all the data written to each row of our summary file
#[derive(Clone, Debug, PartialEq, Serialize)]
struct IntersectionSummaryRow {
    /// The variant type compared, or ALL
    variant_type: String,
    /// Member callers joined by "&", or NO_DATA
    callers: String,
    /// Number of callers in the combination
    num_callers: u32,
    /// Number of variants found by exactly these callers
    count: u64,
    /// Fraction of the union this group represents
    fraction_of_union: Option<f64>
}

impl IntersectionSummaryWriter {
    /// Adds every group from a lattice, in lattice order
    /// # Arguments
    /// * `variant_type` - the label for this comparison, e.g. "ALL" or "snv"
    /// * `lattice` - the comparison results
    pub fn add_lattice(&mut self, variant_type: &str, lattice: &IntersectionLattice) {
        let union_size = lattice.union_size();
        for group in lattice.groups().iter() {
            let fraction_of_union = if union_size > 0 {
                Some(group.count() as f64 / union_size as f64)
            } else {
                None
            };
            self.rows.push(IntersectionSummaryRow {
                variant_type: variant_type.to_string(),
                callers: group.label(),
                num_callers: group.mask().count(),
                count: group.count() as u64,
                fraction_of_union
            });
        }
    }

    /// Marks a comparison that had an empty union
    pub fn add_no_data(&mut self, variant_type: &str) {
        self.rows.push(IntersectionSummaryRow {
            variant_type: variant_type.to_string(),
            callers: NO_DATA.to_string(),
            num_callers: 0,
            count: 0,
            fraction_of_union: None
        });
    }

    /// Will write the summary out to the given file path
    /// # Arguments
    /// * `filename` - the filename for the output (tsv/csv)
    pub fn write_summary(&self, filename: &Path) -> anyhow::Result<()> {
        let mut csv_writer = open_delimited_writer(filename, true)?;
        for row in self.rows.iter() {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::caller_panel::{CallerPanel, NamedVariantSet};
    use crate::data_types::variant_id::VariantId;
    use crate::set_comparator::build_lattice;

    #[test]
    fn test_write_summary() {
        let panel = CallerPanel::new(vec![
            NamedVariantSet::new("bt".to_string(), ["a", "b"].into_iter().map(VariantId::from)),
            NamedVariantSet::new("hc".to_string(), ["b"].into_iter().map(VariantId::from)),
        ]).unwrap();
        let lattice = build_lattice(&panel, true).unwrap();

        let mut writer = IntersectionSummaryWriter::default();
        writer.add_lattice(ALL_TYPES, &lattice);
        writer.add_no_data("complex");
        assert_eq!(writer.rows.len(), 3);
        assert_eq!(writer.rows[0].callers, "bt");
        assert_eq!(writer.rows[1].callers, "bt&hc");
        assert_eq!(writer.rows[1].num_callers, 2);
        assert_eq!(writer.rows[2].callers, NO_DATA);

        let out_fn = std::env::temp_dir().join(format!("callcompare_summary_{}.tsv", std::process::id()));
        writer.write_summary(&out_fn).unwrap();
        let contents = std::fs::read_to_string(&out_fn).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "variant_type\tcallers\tnum_callers\tcount\tfraction_of_union");
        assert_eq!(lines[1], "ALL\tbt\t1\t1\t0.5");
        assert_eq!(lines[3], "complex\tNO_DATA\t0\t0\t");
        std::fs::remove_file(&out_fn).unwrap();
    }
}
