//! Boundary to the host's scene graph.
//!
//! The scene graph itself is an external collaborator; this module only
//! specifies the seam the command handlers talk through. Everything behind
//! [`HostScene`] is main-thread-owned - the trait is invoked exclusively
//! from deferred jobs running inside [`crate::schedule::MainLoop::tick`].

pub mod arrow;
pub mod memory;
pub mod space;

pub use arrow::{ArrowSpec, arrow_between};
pub use memory::MemoryScene;

use crate::error::scene::SceneError;

use glam::Vec3;
use serde_json::Value;

/// Prefix for host collections holding one visualized path graph.
pub const GROUP_PREFIX: &str = "arrow_group_";

/// Host collection name for an externally supplied group id.
pub fn group_name(id: &str) -> String {
    format!("{GROUP_PREFIX}{id}")
}

/// One renderable arrow standing for a parent-to-child edge of a path graph.
#[derive(Debug, Clone)]
pub struct EdgeObject {
    /// `{source}-{destination}`, the key click handlers match on.
    pub name: String,
    pub source: String,
    pub destination: String,
    pub arrow: ArrowSpec,
    pub color: [f32; 4],
    /// Flat destination-node fields, shown by the host's edge inspector.
    pub metadata: Value,
    pub visible: bool,
    pub selected: bool,
}

/// One cursor ray-hit sample taken on the main loop.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorSample {
    pub object: Option<String>,
    pub hit_position: Option<Vec3>,
    pub normal: Option<Vec3>,
    pub face_index: Option<u32>,
    pub cursor_position: Vec3,
}

/// The host scene-graph API consumed by command handlers.
///
/// Implementations are not required to be thread-safe: the scheduler
/// guarantees all calls happen on the thread driving the main loop.
pub trait HostScene {
    /// Diagonal of the bounding box of all scene content; arrow sizing is
    /// proportional to it. Returns 1.0 for an empty scene.
    fn scene_scale(&self) -> f32;

    fn create_group(&mut self, name: &str);

    /// Remove a group and every object in it. False if the group is unknown.
    fn remove_group(&mut self, name: &str) -> bool;

    fn has_group(&self, name: &str) -> bool;

    fn add_edge(&mut self, group: &str, edge: EdgeObject) -> Result<(), SceneError>;

    fn edge_count(&self, group: &str) -> usize;

    fn hide_all(&mut self, group: &str);

    fn show_all(&mut self, group: &str);

    /// Set one edge's visibility by object name. False if no such object.
    fn set_edge_visible(&mut self, group: &str, edge_name: &str, visible: bool) -> bool;

    /// Mark every object in the group selected. Returns how many matched.
    fn select_all(&mut self, group: &str) -> usize;

    /// Center the viewport on one edge object.
    fn frame_edge(&mut self, group: &str, edge_name: &str);

    /// Fit the viewport around everything visible.
    fn frame_all(&mut self);

    /// Drop all mutable scene content: objects, meshes, materials,
    /// textures, and auxiliary collections.
    fn clear(&mut self);

    /// Re-invoke the scene-interchange importer on a named file.
    fn import_interchange(&mut self, scene_name: &str) -> Result<(), SceneError>;

    /// Sample the cursor ray against scene geometry, if a viewport exists.
    fn cursor_sample(&self) -> Option<CursorSample>;
}
