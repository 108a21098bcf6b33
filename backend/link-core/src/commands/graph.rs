//! Path-graph payload model.
//!
//! `create_path` carries a JSON-string-encoded tree of tracer nodes. This
//! module owns the typed tree, the depth-first flattening into nodes and
//! parent-to-child edges, and the fixed lookup tables that turn a
//! (source-type, destination-type) pair into an edge label and color.

use crate::scene::space::renderer_to_host;

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter, Result as FormatResult};

use glam::Vec3;
use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Node id as sent by the tracer; either a string or an integer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NodeId {
    Text(String),
    Number(i64),
}

impl Display for NodeId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        match self {
            NodeId::Text(text) => write!(formatter, "{text}"),
            NodeId::Number(number) => write!(formatter, "{number}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One node of the tracer's path tree, as serialized by the renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct PathNode {
    #[serde(rename = "Id")]
    pub id: NodeId,

    #[serde(rename = "Position")]
    pub position: Position,

    /// Polymorphic type tag, e.g. `BSDFSampleNode`.
    #[serde(rename = "$type")]
    pub node_type: String,

    /// Parent node id; absent on roots. Edges come from this field, not
    /// from traversal order.
    #[serde(rename = "ancestorId", default)]
    pub ancestor_id: Option<NodeId>,

    #[serde(rename = "Successors", default)]
    pub successors: Vec<PathNode>,

    /// Whatever extra per-node fields the tracer attached; carried along
    /// verbatim into edge metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PathNode {
    /// This node's fields as a flat JSON object, successors excluded.
    fn flat_value(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("$type".to_string(), Value::String(self.node_type.clone()));
        fields.insert("Id".to_string(), json!(self.id.to_string()));
        fields.insert(
            "Position".to_string(),
            json!({ "X": self.position.x, "Y": self.position.y, "Z": self.position.z }),
        );
        if let Some(ancestor) = &self.ancestor_id {
            fields.insert("ancestorId".to_string(), json!(ancestor.to_string()));
        }
        for (key, value) in &self.extra {
            fields.insert(key.clone(), value.clone());
        }
        Value::Object(fields)
    }
}

/// Known tracer node kinds; anything unrecognized falls into `Other`
/// rather than failing the whole graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    BsdfSample,
    NextEvent,
    Background,
    LightPath,
    Connection,
    Merge,
    Other,
}

impl NodeType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "BSDFSampleNode" => NodeType::BsdfSample,
            "NextEventNode" => NodeType::NextEvent,
            "BackgroundNode" => NodeType::Background,
            "LightPathNode" => NodeType::LightPath,
            "ConnectionNode" => NodeType::Connection,
            "MergeNode" => NodeType::Merge,
            _ => NodeType::Other,
        }
    }
}

/// One flattened node, position still in renderer space.
#[derive(Debug, Clone)]
pub struct FlatNode {
    pub id: String,
    pub position: Vec3,
    pub node_type: NodeType,
    pub data: Value,
}

/// Flattened tree: nodes in visit order plus parent-to-child edge pairs.
#[derive(Debug, Clone, Default)]
pub struct FlatGraph {
    pub nodes: Vec<FlatNode>,
    pub edges: Vec<(String, String)>,
}

/// Depth-first flattening with a visited-id cycle guard.
pub fn flatten_tree(root: &PathNode) -> FlatGraph {
    let mut graph = FlatGraph::default();
    let mut visited: HashSet<String> = HashSet::new();
    visit(root, &mut graph, &mut visited);
    graph
}

fn visit(node: &PathNode, graph: &mut FlatGraph, visited: &mut HashSet<String>) {
    let id = node.id.to_string();
    if !visited.insert(id.clone()) {
        return;
    }

    graph.nodes.push(FlatNode {
        id: id.clone(),
        position: Vec3::new(node.position.x, node.position.y, node.position.z),
        node_type: NodeType::parse(&node.node_type),
        data: node.flat_value(),
    });

    if let Some(ancestor) = &node.ancestor_id {
        graph.edges.push((ancestor.to_string(), id));
    }

    for successor in &node.successors {
        visit(successor, graph, visited);
    }
}

/// Edge label derived from the endpoint type pair, after any light-path
/// reversal. Unmapped combinations land on the explicit fallback arm.
pub fn edge_kind(source: NodeType, destination: NodeType) -> &'static str {
    use NodeType::*;
    match (source, destination) {
        (_, BsdfSample) => "BSDF",
        (_, NextEvent) => "Next Event",
        (_, Background) => "Background",
        (_, LightPath) => "Light Path",
        (BsdfSample, Connection) => "Camera Path - Connection",
        (LightPath, Connection) => "Light Path - Connection",
        (BsdfSample, Merge) => "Camera Path - Merge",
        (LightPath, Merge) => "Light Path - Merge",
        _ => "Invalid",
    }
}

/// Fixed RGBA color table keyed on the endpoint type pair.
pub fn edge_color(source: NodeType, destination: NodeType) -> [f32; 4] {
    use NodeType::*;
    if source == LightPath || destination == LightPath {
        return [0.0, 1.0, 0.0, 1.0];
    }
    match (source, destination) {
        (BsdfSample, BsdfSample) => [1.0, 0.0, 0.0, 1.0],
        (BsdfSample, NextEvent) => [0.0, 0.0, 1.0, 1.0],
        (BsdfSample, Background) => [0.5, 0.0, 0.5, 1.0],
        _ => [1.0, 0.0, 0.0, 1.0],
    }
}

/// One edge ready to become an arrow: endpoints resolved to host space,
/// light-path direction reversal applied, color and metadata attached.
#[derive(Debug, Clone)]
pub struct EdgePlan {
    pub name: String,
    pub source: String,
    pub destination: String,
    pub start: Vec3,
    pub end: Vec3,
    pub color: [f32; 4],
    pub metadata: Value,
}

/// Resolve flattened edges into drawable plans.
///
/// Edges referencing a node that never appeared in the tree are logged and
/// skipped rather than failing the batch.
pub fn plan_edges(graph: &FlatGraph) -> Vec<EdgePlan> {
    let by_id: HashMap<&str, &FlatNode> = graph
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();

    let mut plans = Vec::with_capacity(graph.edges.len());
    for (parent_id, child_id) in &graph.edges {
        let (Some(parent), Some(child)) = (
            by_id.get(parent_id.as_str()),
            by_id.get(child_id.as_str()),
        ) else {
            warn!("Missing node for edge: {parent_id} -> {child_id}");
            continue;
        };

        // Light transport runs the other way; flip those arrows.
        let light_path = parent.node_type == NodeType::LightPath
            || child.node_type == NodeType::LightPath;
        let (start_node, end_node): (&FlatNode, &FlatNode) =
            if light_path { (child, parent) } else { (parent, child) };

        let kind = edge_kind(start_node.node_type, end_node.node_type);

        let mut metadata = Map::new();
        metadata.insert("Type".to_string(), Value::String(kind.to_string()));
        if let Value::Object(fields) = &end_node.data {
            for (key, value) in fields {
                metadata.insert(key.clone(), value.clone());
            }
        }

        plans.push(EdgePlan {
            name: format!("{}-{}", start_node.id, end_node.id),
            source: start_node.id.clone(),
            destination: end_node.id.clone(),
            start: renderer_to_host(start_node.position),
            end: renderer_to_host(end_node.position),
            color: edge_color(start_node.node_type, end_node.node_type),
            metadata: Value::Object(metadata),
        });
    }
    plans
}
