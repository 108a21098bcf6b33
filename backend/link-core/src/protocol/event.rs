use serde::{Deserialize, Serialize};

/// Outbound events emitted back to the visualization process.
///
/// Serialized with an `event` tag field, mirroring the `command` field on
/// inbound messages. Events are one-way notifications; there is no error
/// event and no reply correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A path group was built in the host scene.
    Created { id: String },

    /// A path group and all of its objects were removed.
    Deleted { id: String },

    /// Every object in a path group was marked selected.
    Selected { id: String },

    /// Periodic cursor ray-hit sample. Hit fields are present only when the
    /// cursor ray actually hit scene geometry.
    CursorTracked {
        object: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hit_position: Option<[f32; 3]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        normal: Option<[f32; 3]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        face_index: Option<u32>,
        cursor_position: [f32; 3],
    },
}
