//! `import_scene`: reset the host scene and re-run the interchange import.

use crate::dispatch::CommandHandler;
use crate::error::command::CommandError;
use crate::protocol::Message;
use crate::schedule::MainLoopHandle;

use log::{info, warn};
use serde::Deserialize;

pub(crate) const COMMAND: &str = "import_scene";

#[derive(Deserialize)]
struct ImportScenePayload {
    #[serde(default)]
    scene_name: Option<String>,
}

pub struct ImportScene {
    main_loop: MainLoopHandle,
}

impl ImportScene {
    pub fn new(main_loop: MainLoopHandle) -> Self {
        Self { main_loop }
    }
}

impl CommandHandler for ImportScene {
    fn name(&self) -> &'static str {
        "ImportScene"
    }

    fn handle(&self, message: &Message) -> Result<(), CommandError> {
        let payload: ImportScenePayload = message
            .payload()
            .map_err(|e| CommandError::payload(COMMAND, e))?;
        let scene_name = payload
            .scene_name
            .ok_or_else(|| CommandError::missing_field(COMMAND, "scene_name"))?;

        self.main_loop.submit(move |scene| {
            // The clear happens regardless; a failed import leaves an empty
            // scene rather than a half-mixed one.
            scene.clear();
            match scene.import_interchange(&scene_name) {
                Ok(()) => info!("Imported scene '{scene_name}'"),
                Err(e) => warn!("Scene import failed for '{scene_name}': {e}"),
            }
        });

        Ok(())
    }
}
