use crate::error::{DagError, DagResult};

use indexmap::{IndexMap, IndexSet};
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt;

////////////////////////////////////////////////////////////////////////////////
// Nodes

/// Node identifiers (must be unique within a DAG)
pub type NodeId = u64;

/// Inference label given to placeholder nodes that mark a severed edge
pub const BOUNDARY_INFERENCE: &str = "Boundary";

/// A derivation step in a proof DAG
///
/// Edges point from a conclusion to its premises, so the `parents` of a node
/// are the nodes it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    clause: String,
    inference: String,
    parents: Vec<NodeId>,
}

impl Node {
    /// Constructs a new node
    pub fn new(
        id: NodeId,
        clause: impl Into<String>,
        inference: impl Into<String>,
        parents: Vec<NodeId>,
    ) -> Self {
        Self {
            id,
            clause: clause.into(),
            inference: inference.into(),
            parents,
        }
    }

    /// Returns the node's identifier
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's clause (never interpreted by this crate)
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// Returns the label of the inference that derived this node
    pub fn inference(&self) -> &str {
        &self.inference
    }

    /// Returns the identifiers of the premises this node was derived from
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Returns true iff the node is a boundary placeholder
    pub fn is_boundary(&self) -> bool {
        self.inference == BOUNDARY_INFERENCE && self.parents.is_empty()
    }

    /// Returns a boundary placeholder standing in for this node: same
    /// identifier and clause, [`BOUNDARY_INFERENCE`] as inference and no
    /// parents
    pub fn to_boundary(&self) -> Self {
        Self {
            id: self.id,
            clause: self.clause.clone(),
            inference: BOUNDARY_INFERENCE.to_owned(),
            parents: vec![],
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.clause)
    }
}

////////////////////////////////////////////////////////////////////////////////
// DAGs

/// A proof DAG (main data structure for this crate)
///
/// The node table maps identifiers to [`Node`]s. The leaves are the terminal
/// nodes of the derivation (its final conclusions); every leaf is a key of the
/// node table. Parent identifiers that do not resolve to a node are
/// tolerated and simply never followed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dag {
    nodes: IndexMap<NodeId, Node>,
    leaves: IndexSet<NodeId>,
}

/// # Creating a DAG
impl Dag {
    /// Creates a new proof DAG
    ///
    /// Fails if two nodes share an identifier or if a leaf is not one of the
    /// nodes.
    pub fn new(
        nodes: impl IntoIterator<Item = Node>,
        leaves: impl IntoIterator<Item = NodeId>,
    ) -> DagResult<Self> {
        let mut table = IndexMap::new();
        for node in nodes {
            let id = node.id;
            if table.insert(id, node).is_some() {
                return Err(DagError::DuplicateNode(id));
            }
        }

        let mut leaf_set = IndexSet::new();
        for leaf in leaves {
            if !table.contains_key(&leaf) {
                return Err(DagError::LeafNotANode(leaf));
            }
            leaf_set.insert(leaf);
        }

        Ok(Self {
            nodes: table,
            leaves: leaf_set,
        })
    }
}

/// # Basic operations
impl Dag {
    /// Returns the node with the given identifier, if it exists
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns true iff a node with the given identifier exists
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns true iff the given identifier is a leaf of the DAG
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.leaves.contains(&id)
    }

    /// Returns an iterator of all nodes in the DAG (in insertion order)
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns an iterator of the identifiers of all nodes in the DAG
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Returns an iterator of the leaf identifiers of the DAG
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.leaves.iter().copied()
    }

    /// Returns the number of nodes in the DAG
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true iff the DAG has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// DOT formatting
impl Dag {
    fn node_format(
        &self,
        highlights: &HashMap<NodeId, String>,
        node: &Node,
    ) -> String {
        let base = if node.is_boundary() {
            "shape=box,style=dashed,color=gray35,fontcolor=gray35".to_string()
        } else if self.is_leaf(node.id) {
            "color=darkslateblue,fontcolor=darkslateblue,penwidth=2"
                .to_string()
        } else {
            "color=black".to_string()
        };
        base + &match highlights.get(&node.id) {
            Some(c) => format!(",style=filled,fillcolor={}", c),
            None => "".to_string(),
        }
    }

    /// Returns a representation of the DAG in the
    /// [DOT](https://graphviz.org/doc/info/lang.html) markup language
    ///
    /// Edges run from each node to its parents. Nodes are highlighted using
    /// the provided colors.
    pub fn dot(&self, highlights: &HashMap<NodeId, String>) -> String {
        let mut pg: DiGraph<&Node, &'static str> = DiGraph::new();
        let translation: HashMap<NodeId, _> = self
            .nodes
            .values()
            .map(|node| (node.id, pg.add_node(node)))
            .collect();

        for node in self.nodes.values() {
            let source = translation[&node.id];
            for parent in &node.parents {
                if let Some(target) = translation.get(parent) {
                    pg.add_edge(source, *target, "");
                }
            }
        }

        let get_node_attrs =
            |_, (_, node): (_, &&Node)| self.node_format(highlights, node);

        let d = petgraph::dot::Dot::with_attr_getters(
            &pg,
            &[petgraph::dot::Config::EdgeNoLabel],
            &|g, e| {
                if g[e.target()].is_boundary() {
                    "color=gray35,style=dashed".to_string()
                } else {
                    "".to_string()
                }
            },
            &get_node_attrs,
        );
        format!("{}", d)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Builder

/// Accumulates the node table and leaf set of a DAG under construction
///
/// Inserting a node whose identifier is already present replaces the earlier
/// entry. [`DagBuilder::build`] drops any leaf without a node, so the result
/// always satisfies the leaf invariant.
#[derive(Debug, Clone, Default)]
pub struct DagBuilder {
    nodes: IndexMap<NodeId, Node>,
    leaves: IndexSet<NodeId>,
}

impl DagBuilder {
    /// Creates a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, replacing any node with the same identifier
    pub fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    /// Marks an identifier as a leaf
    pub fn insert_leaf(&mut self, id: NodeId) {
        self.leaves.insert(id);
    }

    /// Returns true iff a node with the given identifier has been added
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Freezes the accumulated nodes and leaves into a [`Dag`]
    pub fn build(self) -> Dag {
        let Self { nodes, mut leaves } = self;
        leaves.retain(|id| nodes.contains_key(id));
        Dag { nodes, leaves }
    }
}
