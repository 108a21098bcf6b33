//! Reference host binary.
//!
//! Stands in for the 3D application embedding the link: it wires the full
//! stack (config, receiver, dispatcher, sender, cursor tracker) around an
//! in-memory scene and drives the cooperative main loop.

use pathview::error::PathviewError;
use pathview::logger::initialize as LoggerInitialize;

use link_core::commands::register_all;
use link_core::config::LinkConfig;
use link_core::dispatch::Dispatcher;
use link_core::scene::MemoryScene;
use link_core::schedule::MainLoop;
use link_core::tracker::CursorTracker;
use link_core::transport::{Receiver, Sender};

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use log::info;

/// Host frame cadence; every deferred job runs on one of these ticks.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

fn main() {
    if let Err(e) = run() {
        eprintln!("pathview failed to start: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), PathviewError> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| PathviewError::Pathview {
            message: "No local data directory available".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?
        .join("pathview");

    create_dir_all(&data_dir).map_err(|e| PathviewError::Pathview {
        message: format!("Failed to create data directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&data_dir)?;

    info!("Pathview reference host starting");
    info!("Data directory: {}", data_dir.display());

    let config = LinkConfig::load(&data_dir).map_err(|e| PathviewError::Config {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;
    info!("Command address: {}", config.command_address());
    info!("Event address: {}", config.event_address());

    let sender = Sender::new(config.event_address());
    let (mut main_loop, handle) = MainLoop::channel();

    let mut dispatcher = Dispatcher::new();
    register_all(&mut dispatcher, &handle, &sender);

    let mut receiver = Receiver::new(config.command_address(), Arc::new(dispatcher));
    receiver.start().map_err(|e| PathviewError::Link {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let mut tracker = CursorTracker::new(handle.clone(), sender.clone());
    tracker.start().map_err(|e| PathviewError::Link {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    info!("Link running; entering main loop");

    // The host's cooperative main loop. Receiver and tracker workers stay
    // alive for as long as this loop runs.
    let mut scene = MemoryScene::new();
    loop {
        main_loop.tick(&mut scene);
        sleep(TICK_INTERVAL);
    }
}
