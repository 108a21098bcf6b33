// Unit tests for path-graph flattening and the edge lookup tables

use crate::commands::graph::{
    NodeType, PathNode, edge_color, edge_kind, flatten_tree, plan_edges,
};

use glam::Vec3;

fn parse_tree(json: &str) -> PathNode {
    serde_json::from_str(json).unwrap()
}

/// Camera root with one BSDF bounce and a next-event branch off it.
fn sample_tree() -> PathNode {
    parse_tree(
        r#"{
            "Id": 1, "Position": {"X": 0, "Y": 0, "Z": 0}, "$type": "CameraNode",
            "Successors": [
                {
                    "Id": 2, "Position": {"X": 1, "Y": 2, "Z": 3},
                    "$type": "BSDFSampleNode", "ancestorId": 1,
                    "Successors": [
                        {
                            "Id": 3, "Position": {"X": 4, "Y": 5, "Z": 6},
                            "$type": "NextEventNode", "ancestorId": 2,
                            "Successors": []
                        }
                    ]
                }
            ]
        }"#,
    )
}

/// **VALUE**: Verifies depth-first flattening collects every node once and
/// derives edges from `ancestorId`, not traversal order.
#[test]
fn given_nested_tree_when_flattened_then_nodes_and_ancestor_edges_collected() {
    let graph = flatten_tree(&sample_tree());

    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);

    assert_eq!(
        graph.edges,
        [
            ("1".to_string(), "2".to_string()),
            ("2".to_string(), "3".to_string()),
        ]
    );
}

/// **VALUE**: Verifies a repeated node id stops recursion instead of
/// looping or duplicating.
///
/// **WHY THIS MATTERS**: The tracer's trees should be acyclic, but a bad
/// payload must not hang the receiver thread.
#[test]
fn given_duplicate_node_id_when_flattened_then_visited_once() {
    let tree = parse_tree(
        r#"{
            "Id": "a", "Position": {"X": 0, "Y": 0, "Z": 0}, "$type": "CameraNode",
            "Successors": [
                {
                    "Id": "a", "Position": {"X": 9, "Y": 9, "Z": 9},
                    "$type": "BSDFSampleNode", "ancestorId": "a", "Successors": []
                },
                {
                    "Id": "b", "Position": {"X": 1, "Y": 1, "Z": 1},
                    "$type": "BSDFSampleNode", "ancestorId": "a", "Successors": []
                }
            ]
        }"#,
    );

    let graph = flatten_tree(&tree);

    assert_eq!(graph.nodes.len(), 2, "Duplicate 'a' flattened once");
    assert_eq!(graph.edges, [("a".to_string(), "b".to_string())]);
}

#[test]
fn given_string_and_numeric_ids_when_flattened_then_both_stringified() {
    let tree = parse_tree(
        r#"{
            "Id": 10, "Position": {"X": 0, "Y": 0, "Z": 0}, "$type": "CameraNode",
            "Successors": [
                {
                    "Id": "leaf", "Position": {"X": 1, "Y": 0, "Z": 0},
                    "$type": "BackgroundNode", "ancestorId": 10, "Successors": []
                }
            ]
        }"#,
    );

    let graph = flatten_tree(&tree);
    assert_eq!(graph.edges, [("10".to_string(), "leaf".to_string())]);
}

/// **VALUE**: Verifies the edge label table, including the explicit
/// fallback for unmapped type pairs.
#[test]
fn given_type_pairs_when_labeled_then_table_matches() {
    use NodeType::*;

    assert_eq!(edge_kind(Other, BsdfSample), "BSDF");
    assert_eq!(edge_kind(BsdfSample, NextEvent), "Next Event");
    assert_eq!(edge_kind(BsdfSample, Background), "Background");
    assert_eq!(edge_kind(Other, LightPath), "Light Path");
    assert_eq!(edge_kind(BsdfSample, Connection), "Camera Path - Connection");
    assert_eq!(edge_kind(LightPath, Connection), "Light Path - Connection");
    assert_eq!(edge_kind(BsdfSample, Merge), "Camera Path - Merge");
    assert_eq!(edge_kind(LightPath, Merge), "Light Path - Merge");

    // Unmapped pair lands on the fallback, never a panic.
    assert_eq!(edge_kind(Background, Other), "Invalid");
}

#[test]
fn given_type_pairs_when_colored_then_table_matches() {
    use NodeType::*;

    assert_eq!(edge_color(BsdfSample, BsdfSample), [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(edge_color(BsdfSample, NextEvent), [0.0, 0.0, 1.0, 1.0]);
    assert_eq!(edge_color(BsdfSample, Background), [0.5, 0.0, 0.5, 1.0]);

    // Any light-path endpoint wins green, regardless of the other side.
    assert_eq!(edge_color(LightPath, BsdfSample), [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(edge_color(NextEvent, LightPath), [0.0, 1.0, 0.0, 1.0]);

    // Fallback is red.
    assert_eq!(edge_color(Other, Connection), [1.0, 0.0, 0.0, 1.0]);
}

/// **VALUE**: Verifies edge planning converts positions into host space.
///
/// **BUG THIS CATCHES**: Arrows drawn in renderer space would float
/// sideways relative to the imported geometry.
#[test]
fn given_flat_graph_when_planned_then_positions_converted_to_host_space() {
    let plans = plan_edges(&flatten_tree(&sample_tree()));

    assert_eq!(plans.len(), 2);
    let first = &plans[0];
    assert_eq!(first.name, "1-2");
    // Renderer (0,0,0) -> host (0,0,0); renderer (1,2,3) -> host (-1,3,2).
    assert_eq!(first.start, Vec3::ZERO);
    assert_eq!(first.end, Vec3::new(-1.0, 3.0, 2.0));
    assert_eq!(first.color, [1.0, 0.0, 0.0, 1.0], "Camera->BSDF is red");
}

/// **VALUE**: Verifies light-path edges are reversed end to end: name,
/// endpoints, and the label computed after the swap.
#[test]
fn given_light_path_edge_when_planned_then_direction_reversed() {
    let tree = parse_tree(
        r#"{
            "Id": 1, "Position": {"X": 0, "Y": 0, "Z": 0}, "$type": "BSDFSampleNode",
            "Successors": [
                {
                    "Id": 2, "Position": {"X": 5, "Y": 0, "Z": 0},
                    "$type": "LightPathNode", "ancestorId": 1, "Successors": []
                }
            ]
        }"#,
    );

    let plans = plan_edges(&flatten_tree(&tree));

    assert_eq!(plans.len(), 1);
    let plan = &plans[0];
    // Child is the light-path node, so it becomes the start.
    assert_eq!(plan.name, "2-1");
    assert_eq!(plan.start, Vec3::new(-5.0, 0.0, 0.0));
    assert_eq!(plan.end, Vec3::ZERO);
    assert_eq!(plan.color, [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(plan.metadata["Type"], "BSDF", "Label uses post-swap endpoints");
}

/// **VALUE**: Verifies metadata carries the kind label plus the destination
/// node's own fields, including tracer extras preserved verbatim.
#[test]
fn given_extra_node_fields_when_planned_then_metadata_includes_them() {
    let tree = parse_tree(
        r#"{
            "Id": 1, "Position": {"X": 0, "Y": 0, "Z": 0}, "$type": "CameraNode",
            "Successors": [
                {
                    "Id": 2, "Position": {"X": 1, "Y": 0, "Z": 0},
                    "$type": "BSDFSampleNode", "ancestorId": 1,
                    "Pdf": 0.25, "Weight": [1.0, 0.5, 0.0],
                    "Successors": []
                }
            ]
        }"#,
    );

    let plans = plan_edges(&flatten_tree(&tree));
    let metadata = &plans[0].metadata;

    assert_eq!(metadata["Type"], "BSDF");
    assert_eq!(metadata["Id"], "2");
    assert_eq!(metadata["Pdf"], 0.25);
    assert_eq!(metadata["Weight"][1], 0.5);
    assert!(metadata.get("Successors").is_none(), "Children are not metadata");
}

/// **VALUE**: Verifies an edge naming a node absent from the tree is
/// skipped without failing the batch.
#[test]
fn given_edge_to_unknown_node_when_planned_then_skipped() {
    let tree = parse_tree(
        r#"{
            "Id": 1, "Position": {"X": 0, "Y": 0, "Z": 0}, "$type": "CameraNode",
            "Successors": [
                {
                    "Id": 2, "Position": {"X": 1, "Y": 0, "Z": 0},
                    "$type": "BSDFSampleNode", "ancestorId": 99, "Successors": []
                }
            ]
        }"#,
    );

    let plans = plan_edges(&flatten_tree(&tree));
    assert!(plans.is_empty(), "Edge to missing ancestor 99 dropped");
}
