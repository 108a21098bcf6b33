//! `delete_path`: remove one arrow group and everything in it.

use crate::commands::graph::NodeId;
use crate::dispatch::CommandHandler;
use crate::error::command::CommandError;
use crate::protocol::{Event, Message};
use crate::scene::group_name;
use crate::schedule::MainLoopHandle;
use crate::transport::Sender;

use log::debug;
use serde::Deserialize;

pub(crate) const COMMAND: &str = "delete_path";

#[derive(Deserialize)]
struct DeletePathPayload {
    #[serde(default)]
    id: Option<NodeId>,
}

pub struct DeletePath {
    main_loop: MainLoopHandle,
    sender: Sender,
}

impl DeletePath {
    pub fn new(main_loop: MainLoopHandle, sender: Sender) -> Self {
        Self { main_loop, sender }
    }
}

impl CommandHandler for DeletePath {
    fn name(&self) -> &'static str {
        "DeletePath"
    }

    fn handle(&self, message: &Message) -> Result<(), CommandError> {
        let payload: DeletePathPayload = message
            .payload()
            .map_err(|e| CommandError::payload(COMMAND, e))?;
        let id = payload
            .id
            .ok_or_else(|| CommandError::missing_field(COMMAND, "id"))?
            .to_string();

        let sender = self.sender.clone();
        self.main_loop.submit(move |scene| {
            let group = group_name(&id);
            // Deleting a group that never existed (or was already deleted)
            // is a quiet no-op with no event.
            if scene.remove_group(&group) {
                sender.send(&Event::Deleted { id });
            } else {
                debug!("No path group '{group}' to delete");
            }
        });

        Ok(())
    }
}
