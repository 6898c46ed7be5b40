use crate::core::*;
use crate::traversal::{PostOrder, ReversePostOrder};

use std::collections::HashSet;
use tracing::{debug, trace};

/// Returns a new DAG holding the nodes whose identifier is in `relevant_ids`
/// together with all of their transitive parents
///
/// Leaves of `dag` that survive remain leaves. Identifiers in `relevant_ids`
/// that are not nodes of `dag` have no effect.
pub fn filter_non_parents(dag: &Dag, relevant_ids: &HashSet<NodeId>) -> Dag {
    let mut transitive_parents = relevant_ids.clone();
    let mut remaining = DagBuilder::new();

    // A node is produced only after every node naming it as a parent
    for node in ReversePostOrder::new(dag) {
        if !transitive_parents.contains(&node.id()) {
            continue;
        }

        transitive_parents.extend(node.parents().iter().copied());
        remaining.insert(node.clone());
        if dag.is_leaf(node.id()) {
            remaining.insert_leaf(node.id());
        }
    }

    let filtered = remaining.build();
    debug!(
        relevant = relevant_ids.len(),
        before = dag.len(),
        after = filtered.len(),
        "filtered non-parents"
    );
    filtered
}

/// Returns a new DAG holding the nodes whose identifier is in `relevant_ids`
/// together with all of their transitive consequences (the nodes deriving
/// from them)
///
/// Every parent of a retained node that is not itself retained is replaced by
/// a boundary node (see [`create_boundary_node`]). Boundary nodes are never
/// leaves. Identifiers in `relevant_ids` that are not nodes of `dag` have no
/// effect.
pub fn filter_non_consequences(
    dag: &Dag,
    relevant_ids: &HashSet<NodeId>,
) -> Dag {
    // Unresolvable ids are inert, even when some node names them as parents
    let mut transitive_children: HashSet<NodeId> = relevant_ids
        .iter()
        .copied()
        .filter(|id| dag.contains(*id))
        .collect();
    let mut remaining = DagBuilder::new();
    let mut boundaries = 0usize;

    // A node is produced only after all of its parents
    for node in PostOrder::new(dag) {
        let is_relevant = transitive_children.contains(&node.id())
            || node
                .parents()
                .iter()
                .any(|pid| transitive_children.contains(pid));
        if !is_relevant {
            continue;
        }

        transitive_children.insert(node.id());

        for &pid in node.parents() {
            if transitive_children.contains(&pid) || remaining.contains(pid) {
                continue;
            }
            match dag.get(pid) {
                Some(parent) => {
                    trace!(boundary = pid, child = node.id(), "cut edge");
                    remaining.insert(create_boundary_node(dag, parent));
                    boundaries += 1;
                }
                None => {
                    trace!(parent = pid, child = node.id(), "dangling parent")
                }
            }
        }

        remaining.insert(node.clone());
        if dag.is_leaf(node.id()) {
            remaining.insert_leaf(node.id());
        }
    }

    let filtered = remaining.build();
    debug!(
        relevant = relevant_ids.len(),
        before = dag.len(),
        after = filtered.len(),
        boundaries,
        "filtered non-consequences"
    );
    filtered
}

/// Creates a boundary node standing in for `node`, which must be a node of
/// `dag`
///
/// The boundary node has the same identifier and clause as `node`, the
/// inference [`BOUNDARY_INFERENCE`] and no parents.
pub fn create_boundary_node(dag: &Dag, node: &Node) -> Node {
    assert!(
        dag.contains(node.id()),
        "node {} is not in the DAG",
        node.id()
    );
    node.to_boundary()
}
