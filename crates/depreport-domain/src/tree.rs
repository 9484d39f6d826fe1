//! Dependency tree pruning against the resolved artifact set.

use crate::model::DependencyNode;
use crate::ports::ProjectLookup;
use depreport_types::{Artifact, Coordinates, NodeDetails, Scope, TreeNode, ids};
use std::collections::BTreeSet;

/// Hands out per-run node identifiers. Two ids per node: detail panel and toggle marker.
#[derive(Debug, Default)]
pub struct NodeIds {
    next: u64,
}

impl NodeIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_pair(&mut self) -> (String, String) {
        let n = self.next;
        self.next += 1;
        (
            format!("{}{}", ids::NODE_DETAIL_PREFIX, n),
            format!("{}{}", ids::NODE_TOGGLE_PREFIX, n),
        )
    }
}

/// A node that survived filtering, with its output identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilteredNode<'a> {
    pub artifact: &'a Artifact,
    pub detail_id: String,
    pub toggle_id: String,
    pub children: Vec<FilteredNode<'a>>,
}

impl<'a> FilteredNode<'a> {
    /// Pre-order artifacts of this subtree.
    pub fn artifacts(&self) -> Vec<&'a Artifact> {
        let mut out = vec![self.artifact];
        for child in &self.children {
            out.extend(child.artifacts());
        }
        out
    }
}

/// Keep a child subtree only when the child's own artifact is in `keep`.
///
/// Children of a dropped child are never visited: one missing link cuts the
/// displayed tree at that point. The root is always kept.
pub fn filter_tree<'a>(
    node: &'a DependencyNode,
    keep: &BTreeSet<&Coordinates>,
    ids: &mut NodeIds,
) -> FilteredNode<'a> {
    let (detail_id, toggle_id) = ids.next_pair();
    let children = node
        .children
        .iter()
        .filter(|child| keep.contains(&child.artifact.coordinates))
        .map(|child| filter_tree(child, keep, ids))
        .collect();

    FilteredNode {
        artifact: &node.artifact,
        detail_id,
        toggle_id,
        children,
    }
}

/// Attach detail panels to a filtered tree.
pub fn describe(node: &FilteredNode<'_>, projects: &dyn ProjectLookup) -> TreeNode {
    TreeNode {
        artifact_id: node.artifact.id(),
        scope: node.artifact.scope,
        detail_id: node.detail_id.clone(),
        toggle_id: node.toggle_id.clone(),
        details: details_for(node.artifact, projects),
        children: node
            .children
            .iter()
            .map(|child| describe(child, projects))
            .collect(),
    }
}

fn details_for(artifact: &Artifact, projects: &dyn ProjectLookup) -> NodeDetails {
    if artifact.scope == Scope::System {
        return NodeDetails::System {
            file: artifact.file.as_ref().map(|f| f.path.to_string()),
        };
    }

    match projects.project_for(artifact) {
        Ok(project) => NodeDetails::Project {
            name: project.name,
            description: project.description.filter(|d| !d.is_empty()),
            url: project.url.filter(|u| !u.is_empty()),
            licenses: project.licenses,
        },
        Err(err) => {
            tracing::error!(artifact = %artifact.id(), error = %err, "project lookup failed");
            NodeDetails::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeProjects, artifact, node, project};
    use depreport_types::{ArtifactFile, LicenseEntry};

    fn ids_of(node: &FilteredNode<'_>) -> Vec<String> {
        node.artifacts()
            .iter()
            .map(|a| a.coordinates.artifact_id.clone())
            .collect()
    }

    #[test]
    fn missing_child_prunes_its_whole_subtree() {
        let root = artifact("g", "root", "1", Scope::Compile);
        let a = artifact("g", "a", "1", Scope::Compile);
        let b = artifact("g", "b", "1", Scope::Compile);
        let b1 = artifact("g", "b1", "1", Scope::Compile);

        let tree = node(
            root.clone(),
            vec![node(a.clone(), vec![]), node(b.clone(), vec![node(b1.clone(), vec![])])],
        );
        // b is not selected; b1 is, but must not appear.
        let keep: BTreeSet<&Coordinates> = [&a.coordinates, &b1.coordinates].into_iter().collect();

        let filtered = filter_tree(&tree, &keep, &mut NodeIds::new());
        assert_eq!(ids_of(&filtered), vec!["root", "a"]);
    }

    #[test]
    fn identifiers_are_unique_and_deterministic() {
        let tree = node(
            artifact("g", "root", "1", Scope::Compile),
            vec![
                node(artifact("g", "a", "1", Scope::Compile), vec![]),
                node(artifact("g", "b", "1", Scope::Compile), vec![]),
            ],
        );
        let keep: BTreeSet<&Coordinates> = tree
            .children
            .iter()
            .map(|c| &c.artifact.coordinates)
            .collect();

        let first = filter_tree(&tree, &keep, &mut NodeIds::new());
        let second = filter_tree(&tree, &keep, &mut NodeIds::new());
        assert_eq!(first, second);

        let mut seen = BTreeSet::new();
        for n in [&first, &first.children[0], &first.children[1]] {
            assert!(seen.insert(n.detail_id.clone()));
            assert!(seen.insert(n.toggle_id.clone()));
        }
        assert_eq!(first.detail_id, "_dep0");
        assert_eq!(first.children[1].toggle_id, "_img2");
    }

    #[test]
    fn describe_uses_project_metadata_and_system_files() {
        let root = artifact("g", "root", "1", Scope::Compile);
        let mut sys = artifact("com.sun", "tools", "1.8", Scope::System);
        sys.file = Some(ArtifactFile {
            path: "/opt/jdk/lib/tools.jar".into(),
            size: 10,
        });
        let missing = artifact("g", "missing", "1", Scope::Runtime);

        let tree = node(
            root.clone(),
            vec![node(sys.clone(), vec![]), node(missing.clone(), vec![])],
        );
        let keep: BTreeSet<&Coordinates> =
            [&sys.coordinates, &missing.coordinates].into_iter().collect();

        let mut projects = FakeProjects::default();
        let mut root_project = project("Root", &["Apache-2.0"]);
        root_project.description = Some(String::new());
        projects.insert(&root, root_project);

        let filtered = filter_tree(&tree, &keep, &mut NodeIds::new());
        let described = describe(&filtered, &projects);

        assert_eq!(
            described.details,
            NodeDetails::Project {
                name: "Root".to_string(),
                description: None,
                url: None,
                licenses: vec![LicenseEntry {
                    name: "Apache-2.0".to_string(),
                    url: None
                }],
            }
        );
        assert_eq!(
            described.children[0].details,
            NodeDetails::System {
                file: Some("/opt/jdk/lib/tools.jar".to_string())
            }
        );
        assert_eq!(described.children[1].details, NodeDetails::Unavailable);
    }
}
