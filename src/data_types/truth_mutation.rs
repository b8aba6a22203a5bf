
/// One row of the ground-truth mutation log.
/// There is no chromosome here, so any join against variant records is by position alone.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TruthMutation {
    /// 1-based position
    position: u64,
    /// REF allele
    reference: String,
    /// ALT allele
    alternate: String
}

impl TruthMutation {
    /// Constructor
    pub fn new(position: u64, reference: String, alternate: String) -> Self {
        Self {
            position,
            reference,
            alternate
        }
    }

    /// Returns true if the provided alleles are identical to this mutation
    pub fn alleles_match(&self, reference: &str, alternate: &str) -> bool {
        self.reference == reference && self.alternate == alternate
    }

    // getters
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn alternate(&self) -> &str {
        &self.alternate
    }
}
