
use serde::Serialize;

use crate::data_types::variant_id::VariantId;

/// All the variant types we classify into, based purely on REF/ALT lengths
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize,
    strum_macros::AsRefStr, strum_macros::Display, strum_macros::EnumIter, strum_macros::EnumString,
    clap::ValueEnum
)]
pub enum VariantType {
    /// REF and ALT are both length = 1
    #[strum(ascii_case_insensitive, serialize = "snv")]
    #[serde(rename = "snv")]
    #[clap(name = "snv")]
    Snv,
    /// REF length = 1, ALT length > 1
    #[strum(ascii_case_insensitive, serialize = "ins")]
    #[serde(rename = "ins")]
    #[clap(name = "ins")]
    Insertion,
    /// REF length > 1, ALT length = 1
    #[strum(ascii_case_insensitive, serialize = "del")]
    #[serde(rename = "del")]
    #[clap(name = "del")]
    Deletion,
    /// Anything else, e.g. MNVs and REF/ALT lengths both > 1
    #[strum(ascii_case_insensitive, serialize = "complex")]
    #[serde(rename = "complex")]
    #[clap(name = "complex")]
    Complex
}

impl VariantType {
    /// Classifies a REF/ALT pair by character length. Every pair maps to exactly one type.
    /// # Arguments
    /// * `reference` - the REF allele
    /// * `alternate` - the ALT allele
    pub fn classify(reference: &str, alternate: &str) -> Self {
        match (reference.chars().count(), alternate.chars().count()) {
            (1, 1) => VariantType::Snv,
            (r, 1) if r > 1 => VariantType::Deletion,
            (1, a) if a > 1 => VariantType::Insertion,
            _ => VariantType::Complex
        }
    }
}

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum VariantError {
    #[error("allele{index} is empty (length = 0)")]
    EmptyAllele { index: usize },
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
    #[error("cannot decompose variant identifier {vid:?}: {reason}")]
    VidFormat { vid: String, reason: String }
}

/// The opaque trailing columns of a variant row; carried through but never interpreted
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OpaqueColumns {
    pub qual: String,
    pub filter: String,
    pub info: String,
    pub format: String,
    pub sample: String
}

/// One row of a variant file.
/// The variant type and identifier are derived once at construction and the record is immutable afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariantRecord {
    /// Chromosome or contig name
    chrom: String,
    /// The coordinate of the event in the file, 1-based
    position: u64,
    /// The ID column, often a placeholder like "."
    id: String,
    /// REF allele
    reference: String,
    /// ALT allele
    alternate: String,
    /// Everything after ALT
    opaque: OpaqueColumns,

    // derived values
    variant_type: VariantType,
    vid: VariantId
}

impl VariantRecord {
    /// Creates a new record and derives the type and identifier.
    /// # Arguments
    /// * `chrom` - the chromosome name
    /// * `position` - the 1-based coordinate
    /// * `id` - the raw ID column
    /// * `reference` - the REF allele, must be non-empty
    /// * `alternate` - the ALT allele, must be non-empty
    /// * `opaque` - the remaining columns
    /// # Errors
    /// * if either allele is empty
    pub fn new(chrom: String, position: u64, id: String, reference: String, alternate: String, opaque: OpaqueColumns) -> Result<Self, VariantError> {
        if reference.is_empty() {
            return Err(VariantError::EmptyAllele { index: 0 });
        }
        if alternate.is_empty() {
            return Err(VariantError::EmptyAllele { index: 1 });
        }

        let variant_type = VariantType::classify(&reference, &alternate);
        let vid = VariantId::from_parts(&chrom, position, &reference, &alternate);
        Ok(Self {
            chrom,
            position,
            id,
            reference,
            alternate,
            opaque,
            variant_type,
            vid
        })
    }

    // getters
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn alternate(&self) -> &str {
        &self.alternate
    }

    pub fn opaque(&self) -> &OpaqueColumns {
        &self.opaque
    }

    pub fn variant_type(&self) -> VariantType {
        self.variant_type
    }

    pub fn vid(&self) -> &VariantId {
        &self.vid
    }
}
