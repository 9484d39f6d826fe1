//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - classifier ordering (stable, total, optional-last)
//! - tree filtering (prefix-closed, deterministic ids)
//! - blacklist probing idempotence

use crate::model::{DependencyNode, Repository};
use crate::repositories::{RepositorySet, probe_repositories};
use crate::scope::{compare_artifacts, group_by_scope, sort_artifacts};
use crate::test_support::{CountingProbe, artifact};
use crate::tree::{FilteredNode, NodeIds, filter_tree};
use depreport_types::{Artifact, Coordinates, Scope};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

// ============================================================================
// Strategies
// ============================================================================

fn arb_scope() -> impl Strategy<Value = Scope> {
    prop_oneof![
        Just(Scope::Compile),
        Just(Scope::Runtime),
        Just(Scope::Test),
        Just(Scope::Provided),
        Just(Scope::System),
    ]
}

fn arb_artifact() -> impl Strategy<Value = Artifact> {
    (
        "[a-c]",
        "[a-e]{1,2}",
        "[1-3]\\.[0-2]",
        prop::option::of("[a-b]{0,1}"),
        arb_scope(),
        any::<bool>(),
    )
        .prop_map(|(group, id, version, classifier, scope, optional)| {
            let mut a = artifact(&group, &id, &version, scope);
            a.coordinates.classifier = classifier;
            a.optional = optional;
            a
        })
}

/// Tree of bounded depth whose artifact ids are unique per node.
fn arb_tree() -> impl Strategy<Value = DependencyNode> {
    let leaf = Just(Vec::<DependencyNode>::new());
    leaf.prop_recursive(4, 48, 4, |inner| prop::collection::vec(inner, 0..4).prop_map(|v| {
        vec![DependencyNode {
            artifact: artifact("g", "x", "1", Scope::Compile),
            children: v.into_iter().flatten().collect(),
        }]
    }))
    .prop_map(|children| {
        let mut root = DependencyNode {
            artifact: artifact("g", "root", "1", Scope::Compile),
            children,
        };
        let mut n = 0;
        renumber(&mut root, &mut n);
        root
    })
}

fn renumber(node: &mut DependencyNode, n: &mut usize) {
    node.artifact.coordinates.artifact_id = format!("n{n}");
    *n += 1;
    for child in &mut node.children {
        renumber(child, n);
    }
}

fn all_coordinates(node: &DependencyNode, out: &mut Vec<Coordinates>) {
    out.push(node.artifact.coordinates.clone());
    for child in &node.children {
        all_coordinates(child, out);
    }
}

/// Every kept node's parent chain is kept, and every kept non-root node is in `keep`.
fn assert_prefix_closed(
    filtered: &FilteredNode<'_>,
    keep: &BTreeSet<&Coordinates>,
) -> Result<(), TestCaseError> {
    for child in &filtered.children {
        prop_assert!(keep.contains(&child.artifact.coordinates));
        assert_prefix_closed(child, keep)?;
    }
    Ok(())
}

fn count_reachable(node: &DependencyNode, keep: &BTreeSet<&Coordinates>) -> usize {
    1 + node
        .children
        .iter()
        .filter(|c| keep.contains(&c.artifact.coordinates))
        .map(|c| count_reachable(c, keep))
        .sum::<usize>()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn sorting_places_every_optional_after_every_required(
        artifacts in prop::collection::vec(arb_artifact(), 0..24)
    ) {
        let mut refs: Vec<&Artifact> = artifacts.iter().collect();
        sort_artifacts(&mut refs);

        let first_optional = refs.iter().position(|a| a.optional).unwrap_or(refs.len());
        prop_assert!(refs[first_optional..].iter().all(|a| a.optional));
        for pair in refs.windows(2) {
            prop_assert_ne!(compare_artifacts(pair[0], pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn comparator_is_antisymmetric(a in arb_artifact(), b in arb_artifact()) {
        prop_assert_eq!(compare_artifacts(&a, &b), compare_artifacts(&b, &a).reverse());
    }

    #[test]
    fn sorting_is_stable_for_equal_keys(
        artifacts in prop::collection::vec(arb_artifact(), 0..16)
    ) {
        // Every artifact appears twice so equal keys are guaranteed; positions tell them apart.
        let doubled: Vec<Artifact> = artifacts.iter().chain(artifacts.iter()).cloned().collect();
        let mut sorted: Vec<&Artifact> = doubled.iter().collect();
        sort_artifacts(&mut sorted);

        let position = |a: &Artifact| doubled.iter().position(|d| std::ptr::eq(d, a));
        for pair in sorted.windows(2) {
            prop_assert_ne!(compare_artifacts(pair[0], pair[1]), Ordering::Greater);
            if compare_artifacts(pair[0], pair[1]) == Ordering::Equal {
                prop_assert!(position(pair[0]) < position(pair[1]));
            }
        }
    }

    #[test]
    fn grouping_partitions_without_loss(
        artifacts in prop::collection::vec(arb_artifact(), 0..24)
    ) {
        let buckets = group_by_scope(&artifacts);
        let total: usize = buckets.iter().map(|b| b.artifacts.len()).sum();
        prop_assert_eq!(total, artifacts.len());
        for bucket in &buckets {
            prop_assert!(!bucket.artifacts.is_empty());
            prop_assert!(bucket.artifacts.iter().all(|a| a.scope == bucket.scope));
        }
        let order: Vec<usize> = buckets
            .iter()
            .filter_map(|b| Scope::TABLE_ORDER.iter().position(|s| *s == b.scope))
            .collect();
        prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn tree_filter_is_prefix_closed(
        tree in arb_tree(),
        mask in prop::collection::vec(any::<bool>(), 64)
    ) {
        let mut coords = Vec::new();
        all_coordinates(&tree, &mut coords);
        let keep: BTreeSet<&Coordinates> = coords
            .iter()
            .zip(mask.iter().cycle())
            .filter(|(_, k)| **k)
            .map(|(c, _)| c)
            .collect();

        let filtered = filter_tree(&tree, &keep, &mut NodeIds::new());
        assert_prefix_closed(&filtered, &keep)?;
        prop_assert_eq!(filtered.artifacts().len(), count_reachable(&tree, &keep));
    }

    #[test]
    fn tree_ids_are_unique_and_repeatable(tree in arb_tree()) {
        let mut coords = Vec::new();
        all_coordinates(&tree, &mut coords);
        let keep: BTreeSet<&Coordinates> = coords.iter().collect();

        let first = filter_tree(&tree, &keep, &mut NodeIds::new());
        let second = filter_tree(&tree, &keep, &mut NodeIds::new());
        prop_assert_eq!(&first, &second);

        let mut ids = BTreeSet::new();
        let mut stack = vec![&first];
        while let Some(node) = stack.pop() {
            prop_assert!(ids.insert(node.detail_id.clone()));
            prop_assert!(ids.insert(node.toggle_id.clone()));
            stack.extend(node.children.iter());
        }
    }

    #[test]
    fn probing_is_idempotent(
        urls in prop::collection::vec(0usize..5, 1..10),
        up in prop::collection::btree_set(0usize..5, 0..5)
    ) {
        let url = |i: usize| format!("https://r{i}.example");
        let mut set: RepositorySet = urls
            .iter()
            .enumerate()
            .map(|(n, i)| Repository::new(&format!("repo{n}"), &url(*i)))
            .collect();
        let reachable: Vec<String> = up.iter().map(|i| url(*i)).collect();
        let reachable: Vec<&str> = reachable.iter().map(String::as_str).collect();
        let probe = CountingProbe::new(&reachable, &[]);

        let first = probe_repositories(&mut set, &probe, 3);
        let after_first = set.clone();
        let second = probe_repositories(&mut set, &probe, 3);

        prop_assert_eq!(&set, &after_first);
        prop_assert_eq!(first.blacklisted_urls, second.blacklisted_urls.clone());
        for blacklisted in &second.blacklisted_urls {
            prop_assert_eq!(probe.calls(blacklisted), 1);
        }
    }
}
