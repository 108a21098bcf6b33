//! In-memory host scene.
//!
//! Used by the reference host binary and the test suite. It mirrors the
//! observable behavior the handlers rely on - groups of edge objects,
//! visibility and selection flags, viewport framing calls, scene-wide
//! clear, and interchange import - without any rendering back-end.

use crate::error::scene::SceneError;
use crate::scene::{CursorSample, EdgeObject, HostScene};

use common::ErrorLocation;

use std::collections::HashMap;
use std::panic::Location;
use std::path::PathBuf;

use glam::Vec3;
use log::{debug, info};
use serde_json::Value;

#[derive(Debug, Default)]
pub struct MemoryScene {
    groups: HashMap<String, Vec<EdgeObject>>,
    /// Framing calls in order, newest last ("group/edge" or "*" for fit-all).
    framed: Vec<String>,
    imported: Option<PathBuf>,
    cursor: Option<CursorSample>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edge objects of a group, in insertion order.
    pub fn edges(&self, group: &str) -> Option<&[EdgeObject]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Viewport framing calls recorded so far.
    pub fn framed(&self) -> &[String] {
        &self.framed
    }

    /// Path handed to the interchange importer, if any.
    pub fn imported(&self) -> Option<&PathBuf> {
        self.imported.as_ref()
    }

    /// Install the sample the next `cursor_sample` call returns.
    pub fn set_cursor_sample(&mut self, sample: Option<CursorSample>) {
        self.cursor = sample;
    }

    fn extent(&self) -> Option<(Vec3, Vec3)> {
        let mut bounds: Option<(Vec3, Vec3)> = None;
        for edge in self.groups.values().flatten() {
            for point in [edge.arrow.start, edge.arrow.end] {
                bounds = Some(match bounds {
                    None => (point, point),
                    Some((low, high)) => (low.min(point), high.max(point)),
                });
            }
        }
        bounds
    }
}

impl HostScene for MemoryScene {
    fn scene_scale(&self) -> f32 {
        match self.extent() {
            Some((low, high)) => (high - low).length(),
            None => 1.0,
        }
    }

    fn create_group(&mut self, name: &str) {
        self.groups.entry(name.to_string()).or_default();
    }

    fn remove_group(&mut self, name: &str) -> bool {
        self.groups.remove(name).is_some()
    }

    fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    fn add_edge(&mut self, group: &str, edge: EdgeObject) -> Result<(), SceneError> {
        match self.groups.get_mut(group) {
            Some(edges) => {
                edges.push(edge);
                Ok(())
            }
            None => Err(SceneError::unknown_group(group)),
        }
    }

    fn edge_count(&self, group: &str) -> usize {
        self.groups.get(group).map_or(0, Vec::len)
    }

    fn hide_all(&mut self, group: &str) {
        if let Some(edges) = self.groups.get_mut(group) {
            for edge in edges {
                edge.visible = false;
            }
        }
    }

    fn show_all(&mut self, group: &str) {
        if let Some(edges) = self.groups.get_mut(group) {
            for edge in edges {
                edge.visible = true;
            }
        }
    }

    fn set_edge_visible(&mut self, group: &str, edge_name: &str, visible: bool) -> bool {
        let Some(edges) = self.groups.get_mut(group) else {
            return false;
        };
        let mut matched = false;
        for edge in edges.iter_mut().filter(|e| e.name == edge_name) {
            edge.visible = visible;
            matched = true;
        }
        matched
    }

    fn select_all(&mut self, group: &str) -> usize {
        let Some(edges) = self.groups.get_mut(group) else {
            return 0;
        };
        for edge in edges.iter_mut() {
            edge.selected = true;
        }
        edges.len()
    }

    fn frame_edge(&mut self, group: &str, edge_name: &str) {
        self.framed.push(format!("{group}/{edge_name}"));
    }

    fn frame_all(&mut self) {
        self.framed.push("*".to_string());
    }

    fn clear(&mut self) {
        let groups = self.groups.len();
        self.groups.clear();
        self.framed.clear();
        self.imported = None;
        debug!("Cleared scene ({groups} groups removed)");
    }

    fn import_interchange(&mut self, scene_name: &str) -> Result<(), SceneError> {
        let path = PathBuf::from(scene_name);
        let contents =
            std::fs::read_to_string(&path).map_err(|source| SceneError::ImportRead {
                path: path.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Validate the scene description is well-formed JSON; mesh files it
        // references are resolved lazily by the real importer.
        let _description: Value =
            serde_json::from_str(&contents).map_err(|e| SceneError::ImportParse {
                path: path.clone(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Imported interchange scene from {}", path.display());
        self.imported = Some(path);
        Ok(())
    }

    fn cursor_sample(&self) -> Option<CursorSample> {
        self.cursor.clone()
    }
}
