//! Dependency-respecting walks over the nodes of a [`Dag`]
//!
//! Both walks follow the `parents` edges depth-first, starting from the leaves
//! (in leaf order) and then from every remaining node (in table order), so
//! each node of the DAG is produced exactly once. Parent identifiers that do
//! not resolve to a node are skipped. A walk is single-pass; construct a new
//! one for every pass.

use crate::core::*;

use std::collections::HashSet;
use std::iter::FusedIterator;

struct Frame<'a> {
    node: &'a Node,
    next_parent: usize,
}

/// Depth-first post-order: every node is produced after all of its parents
pub struct PostOrder<'a> {
    dag: &'a Dag,
    roots: Box<dyn Iterator<Item = NodeId> + 'a>,
    stack: Vec<Frame<'a>>,
    visited: HashSet<NodeId>,
}

impl<'a> PostOrder<'a> {
    /// Creates a new post-order walk over `dag`
    pub fn new(dag: &'a Dag) -> Self {
        let roots = dag.leaves().chain(dag.node_ids());
        Self {
            dag,
            roots: Box::new(roots),
            stack: vec![],
            visited: HashSet::with_capacity(dag.len()),
        }
    }

    fn discover(&mut self, id: NodeId) {
        if let Some(node) = self.dag.get(id) {
            if self.visited.insert(id) {
                self.stack.push(Frame {
                    node,
                    next_parent: 0,
                });
            }
        }
    }
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(frame) = self.stack.last_mut() {
                let node = frame.node;
                match node.parents().get(frame.next_parent) {
                    Some(&parent) => {
                        frame.next_parent += 1;
                        self.discover(parent);
                    }
                    None => {
                        self.stack.pop();
                        return Some(node);
                    }
                }
            }

            let root = self.roots.next()?;
            self.discover(root);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dag.len() - self.visited.len() + self.stack.len();
        (remaining, Some(remaining))
    }
}

impl FusedIterator for PostOrder<'_> {}

/// Reverse post-order: every node is produced before all of its parents
///
/// When a node is produced, every node that names it as a parent has already
/// been produced.
pub struct ReversePostOrder<'a> {
    order: std::iter::Rev<std::vec::IntoIter<&'a Node>>,
}

impl<'a> ReversePostOrder<'a> {
    /// Creates a new reverse post-order walk over `dag`
    pub fn new(dag: &'a Dag) -> Self {
        let order: Vec<_> = PostOrder::new(dag).collect();
        Self {
            order: order.into_iter().rev(),
        }
    }
}

impl<'a> Iterator for ReversePostOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl ExactSizeIterator for ReversePostOrder<'_> {}

impl FusedIterator for ReversePostOrder<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(it: impl Iterator<Item = &'a Node>) -> Vec<NodeId> {
        it.map(|n| n.id()).collect()
    }

    fn position(order: &[NodeId], id: NodeId) -> usize {
        order.iter().position(|x| *x == id).unwrap()
    }

    // 5 -> {3, 4}, 3 -> {1, 2}, 4 -> {2}
    fn diamond() -> Dag {
        Dag::new(
            [
                Node::new(1, "a", "Input", vec![]),
                Node::new(2, "b", "Input", vec![]),
                Node::new(3, "c", "Resolution", vec![1, 2]),
                Node::new(4, "d", "Factoring", vec![2]),
                Node::new(5, "e", "Resolution", vec![3, 4]),
            ],
            [5],
        )
        .unwrap()
    }

    #[test]
    fn post_order_visits_parents_first() {
        let dag = diamond();
        let order = ids(PostOrder::new(&dag));
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn reverse_post_order_visits_consumers_first() {
        let dag = diamond();
        let order = ids(ReversePostOrder::new(&dag));
        assert_eq!(order, vec![5, 4, 3, 2, 1]);
        for node in dag.nodes() {
            for parent in node.parents() {
                assert!(
                    position(&order, node.id()) < position(&order, *parent)
                );
            }
        }
    }

    #[test]
    fn unreachable_nodes_are_still_visited() {
        let dag = Dag::new(
            [
                Node::new(10, "x", "Input", vec![]),
                Node::new(11, "y", "Resolution", vec![10]),
                Node::new(12, "z", "Input", vec![]),
            ],
            [],
        )
        .unwrap();
        assert_eq!(ids(PostOrder::new(&dag)), vec![10, 11, 12]);
        assert_eq!(ids(ReversePostOrder::new(&dag)), vec![12, 11, 10]);
    }

    #[test]
    fn dangling_parents_are_skipped() {
        let dag = Dag::new(
            [
                Node::new(1, "a", "Input", vec![]),
                Node::new(2, "b", "Resolution", vec![99, 1]),
            ],
            [2],
        )
        .unwrap();
        assert_eq!(ids(PostOrder::new(&dag)), vec![1, 2]);
    }

    #[test]
    fn walks_are_exhausted_and_fused() {
        let dag = diamond();
        let mut walk = PostOrder::new(&dag);
        assert_eq!(walk.size_hint(), (5, Some(5)));
        assert_eq!(walk.by_ref().count(), 5);
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());

        let mut walk = ReversePostOrder::new(&dag).peekable();
        assert!(walk.peek().is_some());
        assert_eq!(walk.len(), 5);
    }

    #[test]
    fn empty_dag() {
        let dag = Dag::default();
        assert!(PostOrder::new(&dag).next().is_none());
        assert!(ReversePostOrder::new(&dag).next().is_none());
    }
}
