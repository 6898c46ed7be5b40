use crate::core::*;
use crate::error::{DagError, DagResult};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
struct JsonNode {
    id: NodeId,
    clause: String,
    inference: String,
    #[serde(default)]
    parents: Vec<NodeId>,
}

#[derive(Serialize, Deserialize)]
struct JsonDag {
    nodes: Vec<JsonNode>,
    #[serde(default)]
    leaves: Vec<NodeId>,
}

impl From<JsonNode> for Node {
    fn from(value: JsonNode) -> Self {
        Node::new(value.id, value.clause, value.inference, value.parents)
    }
}

impl From<&Node> for JsonNode {
    fn from(node: &Node) -> Self {
        JsonNode {
            id: node.id(),
            clause: node.clause().to_owned(),
            inference: node.inference().to_owned(),
            parents: node.parents().to_vec(),
        }
    }
}

impl TryFrom<JsonDag> for Dag {
    type Error = DagError;

    fn try_from(value: JsonDag) -> Result<Self, Self::Error> {
        Dag::new(value.nodes.into_iter().map(Node::from), value.leaves)
    }
}

impl From<&Dag> for JsonDag {
    fn from(dag: &Dag) -> Self {
        JsonDag {
            nodes: dag.nodes().map(JsonNode::from).collect(),
            leaves: dag.leaves().collect(),
        }
    }
}

impl Serialize for Dag {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        JsonDag::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dag {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let repr = JsonDag::deserialize(deserializer)?;
        Dag::try_from(repr).map_err(serde::de::Error::custom)
    }
}

/// # JSON interchange
///
/// A DAG is stored as
/// `{"nodes": [{"id", "clause", "inference", "parents"}], "leaves": [ids]}`.
impl Dag {
    /// Parses a DAG from JSON, validating it like [`Dag::new`]
    pub fn from_json(s: &str) -> DagResult<Self> {
        let repr: JsonDag = serde_json::from_str(s)?;
        Dag::try_from(repr)
    }

    /// Returns the JSON representation of the DAG
    pub fn to_json(&self) -> DagResult<String> {
        Ok(serde_json::to_string(&JsonDag::from(self))?)
    }
}
