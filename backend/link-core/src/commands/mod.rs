//! Built-in command handlers.
//!
//! One module per wire command. Every handler follows the same shape:
//! validate the typed payload once on the receiver thread, then submit a
//! closure to the main-loop bridge for all scene work. Outbound events are
//! emitted from inside that closure, after the scene mutation they report.

pub mod graph;

mod click_on_node;
mod create_path;
mod dbclick_on_node;
mod delete_path;
mod import_scene;
mod select_path;

pub use click_on_node::ClickOnNode;
pub use create_path::CreatePath;
pub use dbclick_on_node::DbclickOnNode;
pub use delete_path::DeletePath;
pub use import_scene::ImportScene;
pub use select_path::SelectPath;

use crate::dispatch::Dispatcher;
use crate::schedule::MainLoopHandle;
use crate::transport::Sender;

use std::sync::Arc;

/// Register every built-in handler on `dispatcher`.
///
/// Called once during startup, before the dispatcher is frozen behind an
/// `Arc` and handed to the receiver.
pub fn register_all(dispatcher: &mut Dispatcher, main_loop: &MainLoopHandle, sender: &Sender) {
    dispatcher.register(
        create_path::COMMAND,
        Arc::new(CreatePath::new(main_loop.clone(), sender.clone())),
    );
    dispatcher.register(
        delete_path::COMMAND,
        Arc::new(DeletePath::new(main_loop.clone(), sender.clone())),
    );
    dispatcher.register(
        select_path::COMMAND,
        Arc::new(SelectPath::new(main_loop.clone(), sender.clone())),
    );
    dispatcher.register(
        click_on_node::COMMAND,
        Arc::new(ClickOnNode::new(main_loop.clone())),
    );
    dispatcher.register(
        dbclick_on_node::COMMAND,
        Arc::new(DbclickOnNode::new(main_loop.clone())),
    );
    dispatcher.register(
        import_scene::COMMAND,
        Arc::new(ImportScene::new(main_loop.clone())),
    );
}
