//! `select_path`: mark every object of one arrow group selected.

use crate::commands::graph::NodeId;
use crate::dispatch::CommandHandler;
use crate::error::command::CommandError;
use crate::protocol::{Event, Message};
use crate::scene::group_name;
use crate::schedule::MainLoopHandle;
use crate::transport::Sender;

use log::debug;
use serde::Deserialize;

pub(crate) const COMMAND: &str = "select_path";

#[derive(Deserialize)]
struct SelectPathPayload {
    #[serde(default)]
    id: Option<NodeId>,
}

pub struct SelectPath {
    main_loop: MainLoopHandle,
    sender: Sender,
}

impl SelectPath {
    pub fn new(main_loop: MainLoopHandle, sender: Sender) -> Self {
        Self { main_loop, sender }
    }
}

impl CommandHandler for SelectPath {
    fn name(&self) -> &'static str {
        "SelectPath"
    }

    fn handle(&self, message: &Message) -> Result<(), CommandError> {
        let payload: SelectPathPayload = message
            .payload()
            .map_err(|e| CommandError::payload(COMMAND, e))?;
        let id = payload
            .id
            .ok_or_else(|| CommandError::missing_field(COMMAND, "id"))?
            .to_string();

        let sender = self.sender.clone();
        self.main_loop.submit(move |scene| {
            let group = group_name(&id);
            // A missing or empty group selects nothing and stays silent.
            if scene.select_all(&group) > 0 {
                sender.send(&Event::Selected { id });
            } else {
                debug!("No objects to select in '{group}'");
            }
        });

        Ok(())
    }
}
