
use crate::data_types::variant_id::VariantId;

/// Outcome of looking up one private call in the truth log
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum_macros::AsRefStr)]
pub enum TruthMatch {
    /// A truth row at the same position has the same REF and ALT
    #[strum(serialize = "MATCH")]
    Match,
    /// Truth rows exist at the position, but none share the alleles
    #[strum(serialize = "ALLELE_MISMATCH")]
    AlleleMismatch,
    /// No truth row at the position; still counted in the denominator
    #[strum(serialize = "NO_TRUTH")]
    NoTruthAtPosition
}

impl TruthMatch {
    pub fn is_real(&self) -> bool {
        matches!(self, TruthMatch::Match)
    }
}

/// One private call and how it fared against the truth log
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrivateCallOutcome {
    pub vid: VariantId,
    pub truth_match: TruthMatch
}

/// Collects the outcomes for a set of private calls
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationResult {
    outcomes: Vec<PrivateCallOutcome>
}

impl ValidationResult {
    /// Constructor
    pub fn new(outcomes: Vec<PrivateCallOutcome>) -> Self {
        Self {
            outcomes
        }
    }

    /// Number of private calls evaluated
    pub fn total(&self) -> u64 {
        self.outcomes.len() as u64
    }

    /// Number of private calls that matched the truth log
    pub fn real(&self) -> u64 {
        self.outcomes.iter()
            .filter(|o| o.truth_match.is_real())
            .count() as u64
    }

    /// Calculates 100 * real / total if it can; an empty private set is not applicable rather than 0%
    pub fn percent_real(&self) -> Option<f64> {
        let denom = self.total();
        if denom > 0 {
            Some(100.0 * self.real() as f64 / denom as f64)
        } else {
            None
        }
    }

    // getters
    pub fn outcomes(&self) -> &[PrivateCallOutcome] {
        &self.outcomes
    }
}
