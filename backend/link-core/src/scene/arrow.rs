//! Arrow geometry for path-graph edges.
//!
//! Every edge becomes one arrow: a cylinder shaft plus a cone tip, spanning
//! exactly from the source position to the destination position. Thickness
//! and tip size are fixed fractions of the scene scale so arrows read the
//! same regardless of how large the imported scene is.

use glam::{Quat, Vec3};

/// Tip length as a fraction of scene scale (~3% of the scene).
pub const TIP_LENGTH_FRACTION: f32 = 0.03;

/// Shaft radius as a fraction of scene scale (~0.25%).
pub const SHAFT_RADIUS_FRACTION: f32 = 0.0025;

/// Tip radius as a fraction of scene scale (~0.8%).
pub const TIP_RADIUS_FRACTION: f32 = 0.008;

/// Edges shorter than this are degenerate and skipped.
const MIN_EDGE_LENGTH: f32 = 1e-6;

/// Placement of one arrow's shaft and tip primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowSpec {
    pub start: Vec3,
    pub end: Vec3,
    pub shaft_center: Vec3,
    pub shaft_radius: f32,
    pub shaft_length: f32,
    pub tip_center: Vec3,
    pub tip_radius: f32,
    pub tip_length: f32,
    /// Rotation taking the +Z primitive axis onto the edge direction.
    pub rotation: Quat,
}

/// Compute arrow placement from `start` to `end`.
///
/// Returns `None` for a degenerate (near-zero length) edge. The tip is
/// clamped to 40% of the edge for short edges, and the shaft never drops
/// below 5% of the edge length.
pub fn arrow_between(start: Vec3, end: Vec3, scene_scale: f32) -> Option<ArrowSpec> {
    let span = end - start;
    let total_length = span.length();
    if total_length < MIN_EDGE_LENGTH {
        return None;
    }

    let direction = span / total_length;

    let tip_length = (scene_scale * TIP_LENGTH_FRACTION).min(total_length * 0.4);
    let shaft_radius = scene_scale * SHAFT_RADIUS_FRACTION;
    let tip_radius = scene_scale * TIP_RADIUS_FRACTION;
    let shaft_length = (total_length - tip_length).max(total_length * 0.05);

    Some(ArrowSpec {
        start,
        end,
        shaft_center: start + direction * (shaft_length * 0.5),
        shaft_radius,
        shaft_length,
        tip_center: start + direction * (shaft_length + tip_length * 0.5),
        tip_radius,
        tip_length,
        rotation: Quat::from_rotation_arc(Vec3::Z, direction),
    })
}
