//! Axis conversion between renderer space and host space.
//!
//! The renderer works in a Y-up, Z-forward frame; the host is Z-up with Y
//! forward. The mapping must stay in lockstep with the scene exporter's
//! axis conversion or imported path graphs land rotated against the scene.

use glam::Vec3;

/// Map a renderer-space position into host space.
///
/// `(x, y, z) -> (-x, z, y)`: swaps the up axes and mirrors X to keep the
/// frame right-handed. The mapping is its own inverse, so it also takes
/// host-space positions back into renderer space.
pub fn renderer_to_host(position: Vec3) -> Vec3 {
    Vec3::new(-position.x, position.z, position.y)
}
