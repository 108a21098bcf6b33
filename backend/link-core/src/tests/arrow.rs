// Unit tests for arrow placement math

use crate::scene::arrow::{
    SHAFT_RADIUS_FRACTION, TIP_LENGTH_FRACTION, TIP_RADIUS_FRACTION, arrow_between,
};

use glam::Vec3;

const EPSILON: f32 = 1e-5;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn given_zero_length_edge_when_placed_then_none() {
    let point = Vec3::new(1.0, 2.0, 3.0);
    assert!(arrow_between(point, point, 10.0).is_none());
}

/// **VALUE**: Verifies the nominal case: shaft plus tip exactly span the
/// edge, radii scale with the scene.
#[test]
fn given_long_edge_when_placed_then_shaft_and_tip_span_the_edge() {
    let scale = 10.0;
    let arrow = arrow_between(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), scale).unwrap();

    assert!(close(arrow.tip_length, scale * TIP_LENGTH_FRACTION));
    assert!(close(arrow.shaft_length + arrow.tip_length, 4.0));
    assert!(close(arrow.shaft_radius, scale * SHAFT_RADIUS_FRACTION));
    assert!(close(arrow.tip_radius, scale * TIP_RADIUS_FRACTION));

    // Shaft sits at its own half-length, tip beyond the shaft.
    assert!(close(arrow.shaft_center.z, arrow.shaft_length * 0.5));
    assert!(close(
        arrow.tip_center.z,
        arrow.shaft_length + arrow.tip_length * 0.5
    ));
}

/// **VALUE**: Verifies a short edge clamps the tip to 40% of the edge, so
/// the tip can never swallow the whole arrow in a large scene.
#[test]
fn given_short_edge_in_large_scene_when_placed_then_tip_clamped() {
    let edge_length = 0.1;
    let arrow = arrow_between(Vec3::ZERO, Vec3::new(edge_length, 0.0, 0.0), 100.0).unwrap();

    assert!(close(arrow.tip_length, edge_length * 0.4));
    assert!(arrow.shaft_length >= edge_length * 0.05 - EPSILON);
}

/// **VALUE**: Verifies the shaft never collapses below 5% of the edge even
/// when the scale-derived tip would leave less.
#[test]
fn given_tip_dominated_edge_when_placed_then_shaft_floor_holds() {
    // Tip wants 0.3 of a 0.5 edge (clamped to 0.2 = 40%); shaft keeps the
    // rest but never less than 5%.
    let arrow = arrow_between(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), 10.0).unwrap();

    assert!(arrow.shaft_length >= 0.5 * 0.05 - EPSILON);
}

/// **VALUE**: Verifies the rotation takes the +Z primitive axis onto the
/// edge direction for an off-axis edge.
///
/// **BUG THIS CATCHES**: A wrong rotation convention leaves every arrow
/// pointing straight up regardless of its endpoints.
#[test]
fn given_off_axis_edge_when_placed_then_rotation_maps_z_to_direction() {
    let start = Vec3::new(1.0, 1.0, 1.0);
    let end = Vec3::new(4.0, 5.0, 1.0);
    let arrow = arrow_between(start, end, 10.0).unwrap();

    let direction = (end - start).normalize();
    let rotated = arrow.rotation * Vec3::Z;

    assert!((rotated - direction).length() < EPSILON);
}
