
use derive_builder::Builder;
use indexmap::IndexMap;
use log::debug;
use rustc_hash::FxHashMap;

use crate::data_types::caller_panel::{CallerPanel, CompareError, MembershipMask};
use crate::data_types::intersection_lattice::{IntersectionGroup, IntersectionLattice};
use crate::data_types::variant_id::VariantId;
use crate::data_types::variants::{VariantRecord, VariantType};

/// Lookup from an identifier to its variant type
pub type TypeLookup = FxHashMap<VariantId, VariantType>;

/// Controls a single caller comparison
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct CompareConfig {
    /// if Some, only variants of this type are compared
    variant_type: Option<VariantType>,
    /// if True, each group keeps its identifier list; otherwise only counts are kept
    retain_ids: bool
}

impl Default for CompareConfig {
    fn default() -> Self {
        // everything, with identifiers; main.rs sets these from user input
        Self {
            variant_type: None,
            retain_ids: true
        }
    }
}

impl CompareConfig {
    // getters
    pub fn variant_type(&self) -> Option<VariantType> {
        self.variant_type
    }

    pub fn retain_ids(&self) -> bool {
        self.retain_ids
    }
}

/// Entry point for comparing loaded call sets.
/// # Arguments
/// * `callers` - ordered caller label to loaded records
/// * `config` - the type filter and retention options
/// # Errors
/// * if the panel cannot be built, see [`CallerPanel::new`]
/// * `EmptyComparisonInput` if no caller has any variant after filtering
pub fn compare_callers(callers: &IndexMap<String, Vec<VariantRecord>>, config: CompareConfig) -> Result<IntersectionLattice, CompareError> {
    let panel = CallerPanel::from_records(callers, config.variant_type())?;
    build_lattice(&panel, config.retain_ids())
}

/// Computes the exclusive-intersection lattice over a caller panel.
/// Each identifier in the union gets a membership mask; identifiers sharing a mask form one group.
/// # Arguments
/// * `panel` - the callers and their identifier sets
/// * `retain_ids` - if True, each group keeps its sorted identifiers
/// # Errors
/// * `EmptyComparisonInput` if the union of all sets is empty
pub fn build_lattice(panel: &CallerPanel, retain_ids: bool) -> Result<IntersectionLattice, CompareError> {
    // first pass, figure out who reported each identifier
    let mut memberships: FxHashMap<&VariantId, MembershipMask> = Default::default();
    for (caller_index, _label, ids) in panel.iter() {
        for vid in ids.iter() {
            memberships.entry(vid).or_default().insert(caller_index);
        }
    }

    if memberships.is_empty() {
        return Err(CompareError::EmptyComparisonInput);
    }
    debug!("Union of {} callers contains {} variants", panel.len(), memberships.len());

    // second pass, group by the mask
    let mut grouped: FxHashMap<MembershipMask, (usize, Vec<VariantId>)> = Default::default();
    for (vid, mask) in memberships.into_iter() {
        let entry = grouped.entry(mask).or_default();
        entry.0 += 1;
        if retain_ids {
            entry.1.push(vid.clone());
        }
    }

    let labels = panel.labels();
    let groups: Vec<IntersectionGroup> = grouped.into_iter()
        .map(|(mask, (count, mut ids))| {
            ids.sort();
            let callers: Vec<String> = mask.indices()
                .map(|i| labels[i].clone())
                .collect();
            IntersectionGroup::new(mask, callers, count, ids)
        })
        .collect();

    Ok(IntersectionLattice::new(labels, groups))
}

/// Collects the variant type of every identifier seen across all callers
pub fn build_type_lookup(callers: &IndexMap<String, Vec<VariantRecord>>) -> TypeLookup {
    callers.values()
        .flat_map(|records| records.iter())
        .map(|r| (r.vid().clone(), r.variant_type()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::caller_panel::NamedVariantSet;
    use crate::parsing::variant_loader::load_variant_file;
    use std::path::PathBuf;

    fn named(label: &str, values: &[&str]) -> NamedVariantSet {
        NamedVariantSet::new(label.to_string(), values.iter().map(|&v| VariantId::from(v)))
    }

    fn mask(indices: &[usize]) -> MembershipMask {
        let mut m = MembershipMask::default();
        for &i in indices {
            m.insert(i);
        }
        m
    }

    fn load_example_callers() -> IndexMap<String, Vec<VariantRecord>> {
        [("bt", "caller_a.tsv"), ("hc", "caller_b.tsv"), ("fb", "caller_c.tsv")].into_iter()
            .map(|(label, filename)| {
                let path = PathBuf::from("test_data/callers").join(filename);
                (label.to_string(), load_variant_file(&path).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_three_way_chain() {
        let panel = CallerPanel::new(vec![
            named("A", &["a", "b", "c"]),
            named("B", &["b", "c", "d"]),
            named("C", &["c", "d", "e"]),
        ]).unwrap();
        let lattice = build_lattice(&panel, true).unwrap();

        assert_eq!(lattice.groups().len(), 5);
        assert!(lattice.groups().iter().all(|g| g.count() == 1));
        assert_eq!(lattice.union_size(), 5);

        let expected = [
            (vec![0], "a"),
            (vec![0, 1], "b"),
            (vec![0, 1, 2], "c"),
            (vec![1, 2], "d"),
            (vec![2], "e"),
        ];
        for (indices, vid) in expected {
            let group = lattice.group(mask(&indices)).unwrap();
            assert_eq!(group.ids(), &[VariantId::from(vid)]);
        }

        // all ties, so this is purely label order
        let labels: Vec<String> = lattice.groups().iter().map(|g| g.label()).collect();
        assert_eq!(labels, vec!["A", "A&B", "A&B&C", "B&C", "C"]);
    }

    #[test]
    fn test_order_by_count() {
        let panel = CallerPanel::new(vec![
            named("x", &["1", "2", "3", "4"]),
            named("y", &["3", "4", "5"]),
        ]).unwrap();
        let lattice = build_lattice(&panel, true).unwrap();
        let summary: Vec<(String, usize)> = lattice.groups().iter()
            .map(|g| (g.label(), g.count()))
            .collect();
        assert_eq!(summary, vec![
            ("x".to_string(), 2), ("x&y".to_string(), 2), ("y".to_string(), 1)
        ]);
    }

    #[test]
    fn test_empty_caller_and_duplicates() {
        let panel = CallerPanel::new(vec![
            named("x", &["1", "1", "2"]),
            named("y", &[]),
            named("z", &["2"]),
        ]).unwrap();
        let lattice = build_lattice(&panel, true).unwrap();
        assert_eq!(lattice.union_size(), 2);
        assert_eq!(lattice.private_ids(0), &[VariantId::from("1")]);
        assert!(lattice.private_ids(1).is_empty());
        assert!(lattice.private_ids(2).is_empty());
        assert_eq!(lattice.group(mask(&[0, 2])).unwrap().count(), 1);
    }

    #[test]
    fn test_empty_union() {
        let panel = CallerPanel::new(vec![named("x", &[]), named("y", &[])]).unwrap();
        assert_eq!(build_lattice(&panel, true).unwrap_err(), CompareError::EmptyComparisonInput);
    }

    #[test]
    fn test_counts_only() {
        let panel = CallerPanel::new(vec![
            named("x", &["1", "2"]),
            named("y", &["2", "3"]),
        ]).unwrap();
        let lattice = build_lattice(&panel, false).unwrap();
        assert_eq!(lattice.union_size(), 3);
        assert!(lattice.groups().iter().all(|g| g.ids().is_empty()));
    }

    #[test]
    fn test_compare_files() {
        let callers = load_example_callers();
        let lattice = compare_callers(&callers, CompareConfig::default()).unwrap();

        // 9 unique variants across the three files
        assert_eq!(lattice.union_size(), 9);
        let summary: Vec<(String, usize)> = lattice.groups().iter()
            .map(|g| (g.label(), g.count()))
            .collect();
        assert_eq!(summary, vec![
            ("bt".to_string(), 3),
            ("bt&hc&fb".to_string(), 2),
            ("bt&hc".to_string(), 1),
            ("fb".to_string(), 1),
            ("hc".to_string(), 1),
            ("hc&fb".to_string(), 1),
        ]);
        assert_eq!(lattice.private_ids(1), &[VariantId::from("chr1_600_A_ACC")]);
    }

    #[test]
    fn test_compare_by_type() {
        let callers = load_example_callers();

        let config = CompareConfigBuilder::default()
            .variant_type(Some(VariantType::Deletion))
            .build().unwrap();
        let lattice = compare_callers(&callers, config).unwrap();
        assert_eq!(lattice.union_size(), 1);
        assert_eq!(lattice.groups()[0].label(), "bt&hc");

        let config = CompareConfigBuilder::default()
            .variant_type(Some(VariantType::Snv))
            .build().unwrap();
        let lattice = compare_callers(&callers, config).unwrap();
        assert_eq!(lattice.union_size(), 5);

        // per-type counts add back up to the full union
        let total: usize = [VariantType::Snv, VariantType::Insertion, VariantType::Deletion, VariantType::Complex].into_iter()
            .map(|vt| {
                let config = CompareConfigBuilder::default().variant_type(Some(vt)).build().unwrap();
                compare_callers(&callers, config).map(|l| l.union_size()).unwrap_or(0)
            })
            .sum();
        assert_eq!(total, 9);
    }

    #[test]
    fn test_membership_rows() {
        let callers = load_example_callers();
        let lattice = compare_callers(&callers, CompareConfig::default()).unwrap();
        let type_lookup = build_type_lookup(&callers);
        let rows = lattice.membership_rows(&type_lookup).unwrap();
        assert_eq!(rows.len(), 9);

        // sorted by identifier
        assert_eq!(rows[0].vid.as_str(), "chr1_100_A_G");
        assert_eq!(rows[0].variant_type, VariantType::Snv);
        assert_eq!(rows[0].members, vec![true, true, true]);
        let deletion = rows.iter().find(|r| r.vid.as_str() == "chr1_200_AT_A").unwrap();
        assert_eq!(deletion.variant_type, VariantType::Deletion);
        assert_eq!(deletion.members, vec![true, true, false]);

        // a missing type is an error
        assert!(lattice.membership_rows(&TypeLookup::default()).is_err());
    }
}
