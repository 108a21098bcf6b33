//! `create_path`: build one arrow group from a path-graph tree.

use crate::commands::graph::{self, NodeId, PathNode};
use crate::dispatch::CommandHandler;
use crate::error::command::CommandError;
use crate::protocol::{Event, Message};
use crate::scene::{EdgeObject, arrow_between, group_name};
use crate::schedule::MainLoopHandle;
use crate::transport::Sender;

use log::{debug, warn};
use serde::Deserialize;

pub(crate) const COMMAND: &str = "create_path";

#[derive(Deserialize)]
struct CreatePathPayload {
    #[serde(default)]
    id: Option<NodeId>,

    /// JSON-string-encoded tree of tracer nodes.
    #[serde(default)]
    graph: Option<String>,
}

pub struct CreatePath {
    main_loop: MainLoopHandle,
    sender: Sender,
}

impl CreatePath {
    pub fn new(main_loop: MainLoopHandle, sender: Sender) -> Self {
        Self { main_loop, sender }
    }
}

impl CommandHandler for CreatePath {
    fn name(&self) -> &'static str {
        "CreatePath"
    }

    fn handle(&self, message: &Message) -> Result<(), CommandError> {
        let payload: CreatePathPayload = message
            .payload()
            .map_err(|e| CommandError::payload(COMMAND, e))?;

        let id = payload
            .id
            .ok_or_else(|| CommandError::missing_field(COMMAND, "id"))?
            .to_string();
        let graph_text = payload
            .graph
            .ok_or_else(|| CommandError::missing_field(COMMAND, "graph"))?;

        // The graph is validated here, on the receiver thread, so a broken
        // payload never reaches the main loop.
        let root: PathNode = serde_json::from_str(&graph_text)
            .map_err(|e| CommandError::payload(COMMAND, e))?;
        let plans = graph::plan_edges(&graph::flatten_tree(&root));

        let sender = self.sender.clone();
        self.main_loop.submit(move |scene| {
            let group = group_name(&id);

            // A repeated create replaces the previous group wholesale.
            if scene.remove_group(&group) {
                debug!("Replacing existing path group '{group}'");
            }
            scene.create_group(&group);

            // Scale is sampled before any arrows land, so arrow sizing
            // follows the imported scene, not the arrows themselves.
            let scale = scene.scene_scale();

            for plan in plans {
                let Some(arrow) = arrow_between(plan.start, plan.end, scale) else {
                    debug!("Skipping degenerate edge '{}'", plan.name);
                    continue;
                };
                let edge = EdgeObject {
                    name: plan.name,
                    source: plan.source,
                    destination: plan.destination,
                    arrow,
                    color: plan.color,
                    metadata: plan.metadata,
                    visible: true,
                    selected: false,
                };
                if let Err(e) = scene.add_edge(&group, edge) {
                    warn!("Failed to add edge to '{group}': {e}");
                }
            }

            sender.send(&Event::Created { id });
        });

        Ok(())
    }
}
