
use indexmap::IndexMap;
use std::collections::BTreeSet;

use crate::data_types::variant_id::VariantId;
use crate::data_types::variants::{VariantRecord, VariantType};

/// Upper bound on callers, one bit each in a [`MembershipMask`]
pub const MAX_CALLERS: usize = 64;

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum CompareError {
    #[error("no callers were provided")]
    NoCallers,
    #[error("duplicate caller label: {label:?}")]
    DuplicateCaller { label: String },
    #[error("{count} callers provided, at most {max} are supported", max = MAX_CALLERS)]
    TooManyCallers { count: usize },
    #[error("no variants found in any caller")]
    EmptyComparisonInput
}

/// A caller label paired with the set of identifiers it reported.
/// Duplicate identifiers collapse on construction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NamedVariantSet {
    /// Caller label
    label: String,
    /// The unique identifiers
    ids: BTreeSet<VariantId>
}

impl NamedVariantSet {
    /// Constructor
    /// # Arguments
    /// * `label` - the caller label
    /// * `ids` - any collection of identifiers, duplicates allowed
    pub fn new(label: String, ids: impl IntoIterator<Item = VariantId>) -> Self {
        Self {
            label,
            ids: ids.into_iter().collect()
        }
    }

    /// Builds the set from loaded records, optionally keeping only one variant type.
    /// # Arguments
    /// * `label` - the caller label
    /// * `records` - all records loaded for this caller
    /// * `type_filter` - if Some, only records of this type are kept
    pub fn from_records(label: String, records: &[VariantRecord], type_filter: Option<VariantType>) -> Self {
        let ids = records.iter()
            .filter(|r| type_filter.is_none_or(|vt| r.variant_type() == vt))
            .map(|r| r.vid().clone());
        Self::new(label, ids)
    }

    // getters
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn ids(&self) -> &BTreeSet<VariantId> {
        &self.ids
    }
}

/// Ordered, fixed enumeration of the callers in a comparison.
/// The index of a caller here is its bit in every [`MembershipMask`].
#[derive(Clone, Debug, Default)]
pub struct CallerPanel {
    sets: IndexMap<String, BTreeSet<VariantId>>
}

impl CallerPanel {
    /// Creates a panel in the order the sets are provided.
    /// # Errors
    /// * if no sets are provided, or more than [`MAX_CALLERS`]
    /// * if two sets share a label
    pub fn new(sets: Vec<NamedVariantSet>) -> Result<Self, CompareError> {
        if sets.is_empty() {
            return Err(CompareError::NoCallers);
        }
        if sets.len() > MAX_CALLERS {
            return Err(CompareError::TooManyCallers { count: sets.len() });
        }

        let mut lookup: IndexMap<String, BTreeSet<VariantId>> = Default::default();
        for set in sets.into_iter() {
            if lookup.contains_key(&set.label) {
                return Err(CompareError::DuplicateCaller { label: set.label });
            }
            lookup.insert(set.label, set.ids);
        }

        Ok(Self {
            sets: lookup
        })
    }

    /// Builds a panel directly from per-caller records, optionally restricted to a single variant type.
    /// # Arguments
    /// * `callers` - ordered caller label to loaded records
    /// * `type_filter` - if Some, only records of this type contribute
    pub fn from_records(callers: &IndexMap<String, Vec<VariantRecord>>, type_filter: Option<VariantType>) -> Result<Self, CompareError> {
        let sets = callers.iter()
            .map(|(label, records)| NamedVariantSet::from_records(label.clone(), records, type_filter))
            .collect();
        Self::new(sets)
    }

    /// Caller labels in panel order
    pub fn labels(&self) -> Vec<String> {
        self.sets.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterates (index, label, identifiers) in panel order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &BTreeSet<VariantId>)> {
        self.sets.iter()
            .enumerate()
            .map(|(i, (label, ids))| (i, label.as_str(), ids))
    }
}

/// Fixed-size membership vector; bit `i` is set when caller `i` of the panel reported the variant
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MembershipMask(u64);

impl MembershipMask {
    /// Marks the caller at `index` as a member
    /// # Panics
    /// * if `index` >= [`MAX_CALLERS`]
    pub fn insert(&mut self, index: usize) {
        assert!(index < MAX_CALLERS, "caller index out of range");
        self.0 |= 1_u64 << index;
    }

    /// Returns true if the caller at `index` is a member
    pub fn contains(&self, index: usize) -> bool {
        index < MAX_CALLERS && (self.0 >> index) & 1 == 1
    }

    /// Number of callers in this mask
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if exactly one caller, `index`, is a member
    pub fn is_exclusive_to(&self, index: usize) -> bool {
        self.count() == 1 && self.contains(index)
    }

    /// Member indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_CALLERS).filter(|&i| self.contains(i))
    }

    /// Expands into a boolean per caller for a panel of size `num_callers`
    pub fn to_bools(&self, num_callers: usize) -> Vec<bool> {
        (0..num_callers).map(|i| self.contains(i)).collect()
    }
}
