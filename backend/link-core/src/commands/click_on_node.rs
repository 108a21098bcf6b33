//! `click_on_node`: isolate one path through the graph by visibility.
//!
//! Hides every edge of the group, then reveals either all of them (full
//! graph) or exactly the consecutive-pair edges of the clicked id path.

use crate::commands::graph::NodeId;
use crate::dispatch::CommandHandler;
use crate::error::command::CommandError;
use crate::protocol::Message;
use crate::scene::{HostScene, group_name};
use crate::schedule::MainLoopHandle;

use log::debug;
use serde::Deserialize;

pub(crate) const COMMAND: &str = "click_on_node";

/// A node-id path, either inline or JSON-string-encoded.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum IdPath {
    Ids(Vec<NodeId>),
    Encoded(String),
}

impl IdPath {
    pub(crate) fn decode(self, command: &'static str) -> Result<Vec<String>, CommandError> {
        let ids = match self {
            IdPath::Ids(ids) => ids,
            IdPath::Encoded(text) => serde_json::from_str::<Vec<NodeId>>(&text)
                .map_err(|e| CommandError::payload(command, e))?,
        };
        Ok(ids.iter().map(NodeId::to_string).collect())
    }
}

#[derive(Deserialize)]
pub(crate) struct ClickPayload {
    #[serde(default)]
    pub(crate) path_id: Option<NodeId>,

    #[serde(default)]
    pub(crate) path: Option<IdPath>,

    #[serde(default)]
    pub(crate) is_full_graph: bool,
}

/// Hide everything in `group`, then reveal the selection.
///
/// Returns the object names revealed for a concrete path (empty for the
/// full-graph case). Edge objects are matched in either endpoint order,
/// since light-path reversal may have flipped the stored direction.
pub(crate) fn reveal_path(
    scene: &mut dyn HostScene,
    group: &str,
    ids: &[String],
    full_graph: bool,
) -> Vec<String> {
    scene.hide_all(group);

    if full_graph {
        scene.show_all(group);
        return Vec::new();
    }

    let mut revealed = Vec::new();
    for pair in ids.windows(2) {
        let forward = format!("{}-{}", pair[0], pair[1]);
        let backward = format!("{}-{}", pair[1], pair[0]);
        if scene.set_edge_visible(group, &forward, true) {
            revealed.push(forward);
        } else if scene.set_edge_visible(group, &backward, true) {
            revealed.push(backward);
        } else {
            debug!("No edge object between '{}' and '{}'", pair[0], pair[1]);
        }
    }
    revealed
}

pub struct ClickOnNode {
    main_loop: MainLoopHandle,
}

impl ClickOnNode {
    pub fn new(main_loop: MainLoopHandle) -> Self {
        Self { main_loop }
    }
}

impl CommandHandler for ClickOnNode {
    fn name(&self) -> &'static str {
        "ClickOnNode"
    }

    fn handle(&self, message: &Message) -> Result<(), CommandError> {
        let payload: ClickPayload = message
            .payload()
            .map_err(|e| CommandError::payload(COMMAND, e))?;

        let path_id = payload
            .path_id
            .ok_or_else(|| CommandError::missing_field(COMMAND, "path_id"))?
            .to_string();
        let ids = match payload.path {
            Some(path) => path.decode(COMMAND)?,
            None => Vec::new(),
        };
        let full_graph = payload.is_full_graph;

        self.main_loop.submit(move |scene| {
            let group = group_name(&path_id);
            reveal_path(scene, &group, &ids, full_graph);
        });

        Ok(())
    }
}
