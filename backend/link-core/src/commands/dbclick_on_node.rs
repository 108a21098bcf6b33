//! `dbclick_on_node`: `click_on_node` plus viewport framing.

use crate::commands::click_on_node::{ClickPayload, reveal_path};
use crate::dispatch::CommandHandler;
use crate::error::command::CommandError;
use crate::protocol::Message;
use crate::scene::group_name;
use crate::schedule::MainLoopHandle;

pub(crate) const COMMAND: &str = "dbclick_on_node";

pub struct DbclickOnNode {
    main_loop: MainLoopHandle,
}

impl DbclickOnNode {
    pub fn new(main_loop: MainLoopHandle) -> Self {
        Self { main_loop }
    }
}

impl CommandHandler for DbclickOnNode {
    fn name(&self) -> &'static str {
        "DbclickOnNode"
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
            let revealed = reveal_path(scene, &group, &ids, full_graph);

            if full_graph {
                scene.frame_all();
            } else {
                for edge_name in &revealed {
                    scene.frame_edge(&group, edge_name);
                }
            }
        });

        Ok(())
    }
}
