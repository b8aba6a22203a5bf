
use std::io::Write;
use std::path::Path;

use crate::data_types::intersection_lattice::MembershipRow;
use crate::util::delimited_io::open_delimited_writer;

/// Writes the per-variant membership table: identifier, type, then one boolean column per caller.
/// This is the annotated table that overlap charts are drawn from.
pub struct MembershipTableWriter {
    /// Handle on the writer
    csv_writer: csv::Writer<Box<dyn Write>>,
    /// Number of caller columns
    num_callers: usize
}

impl MembershipTableWriter {
    /// Creates the file and writes the header
    /// # Arguments
    /// * `filename` - path to the output, .csv/.tsv with optional .gz
    /// * `callers` - caller labels in panel order, these become column names
    pub fn new(filename: &Path, callers: &[String]) -> anyhow::Result<Self> {
        // the caller columns are dynamic, so the header is written by hand
        let mut csv_writer = open_delimited_writer(filename, false)?;
        let header = ["vid", "variant_type"].into_iter()
            .chain(callers.iter().map(|c| c.as_str()));
        csv_writer.write_record(header)?;
        Ok(Self {
            csv_writer,
            num_callers: callers.len()
        })
    }

    /// Writes all of the provided rows
    /// # Errors
    /// * if a row does not have one boolean per caller
    /// * if writing fails
    pub fn write_rows(&mut self, rows: &[MembershipRow]) -> anyhow::Result<()> {
        for row in rows.iter() {
            anyhow::ensure!(
                row.members.len() == self.num_callers,
                "Membership row for {} has {} callers, expected {}", row.vid, row.members.len(), self.num_callers
            );
            let fields = [row.vid.as_str().to_string(), row.variant_type.to_string()].into_iter()
                .chain(row.members.iter().map(|m| m.to_string()));
            self.csv_writer.write_record(fields)?;
        }
        Ok(())
    }

    /// Flushes everything to disk
    pub fn finish(mut self) -> anyhow::Result<()> {
        self.csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::variant_id::VariantId;
    use crate::data_types::variants::VariantType;

    #[test]
    fn test_membership_table() {
        let out_fn = std::env::temp_dir().join(format!("callcompare_membership_{}.csv", std::process::id()));
        let callers = vec!["bt".to_string(), "hc".to_string()];
        let mut writer = MembershipTableWriter::new(&out_fn, &callers).unwrap();
        writer.write_rows(&[
            MembershipRow { vid: VariantId::from("1_5_A_C"), variant_type: VariantType::Snv, members: vec![true, false] },
            MembershipRow { vid: VariantId::from("1_9_AT_A"), variant_type: VariantType::Deletion, members: vec![true, true] },
        ]).unwrap();

        // wrong width is rejected
        assert!(writer.write_rows(&[
            MembershipRow { vid: VariantId::from("1_5_A_C"), variant_type: VariantType::Snv, members: vec![true] }
        ]).is_err());
        writer.finish().unwrap();

        let contents = std::fs::read_to_string(&out_fn).unwrap();
        assert_eq!(contents, "vid,variant_type,bt,hc\n1_5_A_C,snv,true,false\n1_9_AT_A,del,true,true\n");
        std::fs::remove_file(&out_fn).unwrap();
    }
}
