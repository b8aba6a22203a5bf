
use serde::Serialize;

use crate::data_types::variants::VariantError;

/// Character used to join the components of a variant identifier
pub const VID_DELIMITER: char = '_';
/// Number of components in a well-formed identifier: CHROM, POS, REF, ALT
const VID_COMPONENTS: usize = 4;

/// Synthetic variant identifier of the form `chrom_pos_ref_alt`.
/// This is the join key across callers; two identifiers are the same variant if and only if the strings are equal.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct VariantId(String);

/// Borrowed view of the four components stored in a [`VariantId`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecomposedId<'a> {
    pub chrom: &'a str,
    /// 1-based position
    pub position: u64,
    pub reference: &'a str,
    pub alternate: &'a str
}

impl VariantId {
    /// Builds an identifier from the variant coordinates and alleles.
    /// # Arguments
    /// * `chrom` - the chromosome / contig name
    /// * `position` - the 1-based coordinate
    /// * `reference` - the REF allele
    /// * `alternate` - the ALT allele
    pub fn from_parts(chrom: &str, position: u64, reference: &str, alternate: &str) -> Self {
        Self(format!("{chrom}{VID_DELIMITER}{position}{VID_DELIMITER}{reference}{VID_DELIMITER}{alternate}"))
    }

    /// Splits the identifier back into its components.
    /// # Errors
    /// * if the identifier does not split into exactly 4 components, which happens when a component contains the delimiter
    /// * if the position component is not an unsigned integer
    pub fn decompose(&self) -> Result<DecomposedId<'_>, VariantError> {
        let parts: Vec<&str> = self.0.split(VID_DELIMITER).collect();
        if parts.len() != VID_COMPONENTS {
            return Err(VariantError::VidFormat {
                vid: self.0.clone(),
                reason: format!("found {} components, expected {VID_COMPONENTS}", parts.len())
            });
        }

        let position: u64 = parts[1].parse()
            .map_err(|_e| VariantError::VidFormat {
                vid: self.0.clone(),
                reason: format!("position {:?} is not an integer", parts[1])
            })?;

        Ok(DecomposedId {
            chrom: parts[0],
            position,
            reference: parts[2],
            alternate: parts[3]
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for VariantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for VariantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for VariantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let vid = VariantId::from_parts("1", 100, "A", "G");
        assert_eq!(vid.as_str(), "1_100_A_G");
        assert_eq!(vid, VariantId::from("1_100_A_G"));
    }

    #[test]
    fn test_decompose_round_trip() {
        let inputs = [
            ("1", 100, "A", "G"),
            ("chrX", 1, "ACGT", "A"),
            ("chr22", 51_000_000, "T", "TTTA"),
        ];
        for (chrom, position, reference, alternate) in inputs {
            let vid = VariantId::from_parts(chrom, position, reference, alternate);
            let decomposed = vid.decompose().unwrap();
            assert_eq!(decomposed, DecomposedId { chrom, position, reference, alternate });
        }
    }

    #[test]
    fn test_decompose_delimiter_in_chrom() {
        // contigs like this are common in real references and break the scheme
        let vid = VariantId::from_parts("chrUn_KI270302v1", 10, "A", "C");
        let err = vid.decompose().unwrap_err();
        assert!(matches!(err, VariantError::VidFormat { .. }));
    }

    #[test]
    fn test_decompose_too_few() {
        let vid = VariantId::from("1_100_A");
        assert!(matches!(vid.decompose(), Err(VariantError::VidFormat { .. })));
    }

    #[test]
    fn test_decompose_bad_position() {
        let vid = VariantId::from("1_abc_A_G");
        assert!(matches!(vid.decompose(), Err(VariantError::VidFormat { .. })));
    }
}
