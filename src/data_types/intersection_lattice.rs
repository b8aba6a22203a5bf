
use anyhow::anyhow;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::data_types::caller_panel::MembershipMask;
use crate::data_types::variant_id::VariantId;
use crate::data_types::variants::VariantType;

/// Separator used when a group of caller labels is rendered as a single string
pub const CALLER_JOIN: &str = "&";

/// All identifiers reported by exactly one combination of callers
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntersectionGroup {
    /// The membership pattern shared by every identifier in the group
    mask: MembershipMask,
    /// Member caller labels, in panel order
    callers: Vec<String>,
    /// Number of identifiers in the group
    count: usize,
    /// Sorted identifiers; empty if identifiers were not retained
    ids: Vec<VariantId>
}

impl IntersectionGroup {
    /// Constructor
    pub fn new(mask: MembershipMask, callers: Vec<String>, count: usize, ids: Vec<VariantId>) -> Self {
        Self {
            mask, callers, count, ids
        }
    }

    /// The caller combination as a single label, e.g. "bt&hc"
    pub fn label(&self) -> String {
        self.callers.join(CALLER_JOIN)
    }

    // getters
    pub fn mask(&self) -> MembershipMask {
        self.mask
    }

    pub fn callers(&self) -> &[String] {
        &self.callers
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn ids(&self) -> &[VariantId] {
        &self.ids
    }
}

/// One row of the per-variant membership table, a boolean for each caller in panel order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MembershipRow {
    pub vid: VariantId,
    pub variant_type: VariantType,
    pub members: Vec<bool>
}

/// The full exclusive-intersection decomposition over a caller panel.
/// Groups are ordered by descending count, with ties broken by the member label list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IntersectionLattice {
    /// Caller labels in panel order
    callers: Vec<String>,
    /// Non-empty groups in reporting order
    groups: Vec<IntersectionGroup>
}

impl IntersectionLattice {
    /// Creates a lattice and puts the groups in reporting order
    /// # Arguments
    /// * `callers` - the caller labels in panel order
    /// * `groups` - each observed membership group, in any order
    pub fn new(callers: Vec<String>, mut groups: Vec<IntersectionGroup>) -> Self {
        groups.sort_by(|a, b| {
            b.count.cmp(&a.count)
                .then_with(|| a.callers.cmp(&b.callers))
        });
        Self {
            callers,
            groups
        }
    }

    /// Size of the union of all caller sets, equal to the sum of group counts
    pub fn union_size(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Finds the group for an exact caller combination
    pub fn group(&self, mask: MembershipMask) -> Option<&IntersectionGroup> {
        self.groups.iter().find(|g| g.mask == mask)
    }

    /// Identifiers reported only by the caller at `caller_index`, i.e. that caller minus the union of all others
    pub fn private_ids(&self, caller_index: usize) -> &[VariantId] {
        self.groups.iter()
            .find(|g| g.mask.is_exclusive_to(caller_index))
            .map(|g| g.ids())
            .unwrap_or_default()
    }

    /// Builds the per-variant membership table, sorted by identifier.
    /// # Arguments
    /// * `type_lookup` - variant type for every identifier in the lattice
    /// # Errors
    /// * if an identifier is missing from `type_lookup`
    pub fn membership_rows(&self, type_lookup: &FxHashMap<VariantId, VariantType>) -> anyhow::Result<Vec<MembershipRow>> {
        let num_callers = self.callers.len();
        self.groups.iter()
            .flat_map(|g| g.ids.iter().map(move |vid| (vid, g.mask)))
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(vid, mask)| {
                let variant_type = *type_lookup.get(vid)
                    .ok_or_else(|| anyhow!("No variant type found for {vid}"))?;
                Ok(MembershipRow {
                    vid: vid.clone(),
                    variant_type,
                    members: mask.to_bools(num_callers)
                })
            })
            .collect()
    }

    // getters
    pub fn callers(&self) -> &[String] {
        &self.callers
    }

    pub fn groups(&self) -> &[IntersectionGroup] {
        &self.groups
    }
}
