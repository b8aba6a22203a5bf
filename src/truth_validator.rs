
use itertools::Itertools;
use log::trace;
use rustc_hash::FxHashMap;

use crate::data_types::truth_mutation::TruthMutation;
use crate::data_types::validation_result::{PrivateCallOutcome, TruthMatch, ValidationResult};
use crate::data_types::variant_id::VariantId;
use crate::data_types::variants::VariantError;

/// Truth log indexed for a position-only join.
/// The log carries no chromosome, so a call on any chromosome at position P is compared against every truth row at P.
/// Call sets spanning several chromosomes can therefore match a truth row from the "wrong" chromosome.
#[derive(Clone, Debug, Default)]
pub struct TruthIndex {
    by_position: FxHashMap<u64, Vec<TruthMutation>>
}

impl TruthIndex {
    /// Groups the truth mutations by position
    pub fn new(mutations: &[TruthMutation]) -> Self {
        let mut by_position: FxHashMap<u64, Vec<TruthMutation>> = Default::default();
        for mutation in mutations.iter() {
            by_position.entry(mutation.position()).or_default().push(mutation.clone());
        }
        Self {
            by_position
        }
    }

    /// Joins a single call against the truth rows at the same position.
    /// # Arguments
    /// * `position` - the 1-based position of the call; chromosome is not part of the key
    /// * `reference` - REF allele of the call
    /// * `alternate` - ALT allele of the call
    pub fn lookup(&self, position: u64, reference: &str, alternate: &str) -> TruthMatch {
        match self.by_position.get(&position) {
            Some(rows) => {
                if rows.iter().any(|t| t.alleles_match(reference, alternate)) {
                    TruthMatch::Match
                } else {
                    TruthMatch::AlleleMismatch
                }
            },
            None => TruthMatch::NoTruthAtPosition
        }
    }

    /// Number of distinct positions in the truth log
    pub fn num_positions(&self) -> usize {
        self.by_position.len()
    }
}

/// Validates a caller's private identifiers against the truth log.
/// Each identifier is decomposed, joined to the truth by position only, and marked real if REF and ALT match.
/// Identifiers with no truth row at their position are not real but stay in the denominator.
/// Duplicate identifiers are evaluated once.
/// # Arguments
/// * `private_ids` - identifiers unique to one caller
/// * `truth` - the indexed truth log
/// # Errors
/// * `VidFormat` if any identifier does not decompose into exactly 4 components
pub fn validate_private_calls<'a>(private_ids: impl IntoIterator<Item = &'a VariantId>, truth: &TruthIndex) -> Result<ValidationResult, VariantError> {
    let outcomes = private_ids.into_iter()
        .unique()
        .map(|vid| {
            let decomposed = vid.decompose()?;
            let truth_match = truth.lookup(decomposed.position, decomposed.reference, decomposed.alternate);
            trace!("{vid} => {}", truth_match.as_ref());
            Ok(PrivateCallOutcome {
                vid: vid.clone(),
                truth_match
            })
        })
        .collect::<Result<Vec<_>, VariantError>>()?;
    Ok(ValidationResult::new(outcomes))
}
