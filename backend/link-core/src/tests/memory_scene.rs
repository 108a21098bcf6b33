// Unit tests for the in-memory reference scene

use crate::scene::{EdgeObject, HostScene, MemoryScene, arrow_between, group_name};

use glam::Vec3;
use serde_json::json;

fn edge_between(name: &str, start: Vec3, end: Vec3) -> EdgeObject {
    EdgeObject {
        name: name.to_string(),
        source: "s".to_string(),
        destination: "d".to_string(),
        arrow: arrow_between(start, end, 1.0).unwrap(),
        color: [1.0, 0.0, 0.0, 1.0],
        metadata: json!({}),
        visible: true,
        selected: false,
    }
}

#[test]
fn given_external_id_when_group_named_then_prefixed() {
    assert_eq!(group_name("42"), "arrow_group_42");
}

#[test]
fn given_empty_scene_when_scale_queried_then_unit() {
    assert_eq!(MemoryScene::new().scene_scale(), 1.0);
}

/// **VALUE**: Verifies scene scale is the bounding-box diagonal of all
/// arrow endpoints, which is what arrow sizing keys off.
#[test]
fn given_edges_when_scale_queried_then_bounding_diagonal() {
    let mut scene = MemoryScene::new();
    scene.create_group("g");
    scene
        .add_edge("g", edge_between("a-b", Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)))
        .unwrap();

    assert!((scene.scene_scale() - 5.0).abs() < 1e-5);
}

#[test]
fn given_unknown_group_when_edge_added_then_error() {
    let mut scene = MemoryScene::new();

    let result = scene.add_edge("nope", edge_between("a-b", Vec3::ZERO, Vec3::X));

    assert!(result.is_err());
}

#[test]
fn given_unknown_edge_when_visibility_set_then_false() {
    let mut scene = MemoryScene::new();
    scene.create_group("g");

    assert!(!scene.set_edge_visible("g", "missing", true));
    assert!(!scene.set_edge_visible("no_group", "missing", true));
}

#[test]
fn given_populated_group_when_select_all_then_count_returned() {
    let mut scene = MemoryScene::new();
    scene.create_group("g");
    scene.add_edge("g", edge_between("a-b", Vec3::ZERO, Vec3::X)).unwrap();
    scene.add_edge("g", edge_between("b-c", Vec3::X, Vec3::Y)).unwrap();

    assert_eq!(scene.select_all("g"), 2);
    assert_eq!(scene.select_all("empty"), 0);
}

/// **VALUE**: Verifies `clear` resets every piece of mutable scene state,
/// the contract `import_scene` relies on.
#[test]
fn given_populated_scene_when_cleared_then_all_state_reset() {
    let mut scene = MemoryScene::new();
    scene.create_group("g");
    scene.add_edge("g", edge_between("a-b", Vec3::ZERO, Vec3::X)).unwrap();
    scene.frame_all();

    scene.clear();

    assert!(!scene.has_group("g"));
    assert!(scene.framed().is_empty());
    assert_eq!(scene.imported(), None);
}
