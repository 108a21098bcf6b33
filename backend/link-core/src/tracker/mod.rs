//! Periodic cursor tracking.
//!
//! A worker thread wakes every [`SAMPLE_INTERVAL`] and submits one deferred
//! job to the main loop. The job samples the cursor ray-hit against scene
//! geometry (sampling must happen on the loop thread, like every other
//! scene read), deduplicates against the last emitted sample, and sends a
//! `cursor_tracked` event for anything new.
//!
//! Start/stop follow the receiver's idiom: `start()` is idempotent,
//! `stop()` only raises a flag and the worker winds down within one
//! interval.

use crate::protocol::Event;
use crate::scene::CursorSample;
use crate::schedule::MainLoopHandle;
use crate::transport::Sender;

use crate::error::transport::TransportError;

use common::ErrorLocation;

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{Builder as ThreadBuilder, JoinHandle, sleep};
use std::time::Duration;

use log::debug;

/// How often a cursor sample job is submitted.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

pub struct CursorTracker {
    main_loop: MainLoopHandle,
    sender: Sender,
    stop: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl CursorTracker {
    pub fn new(main_loop: MainLoopHandle, sender: Sender) -> Self {
        Self {
            main_loop,
            sender,
            stop: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Spawn the sampling worker. Calling while already running is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Spawn`] if the worker thread cannot start.
    pub fn start(&mut self) -> Result<(), TransportError> {
        if self.running.load(Ordering::SeqCst) {
            debug!("Cursor tracker already running");
            return Ok(());
        }

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        self.stop.store(false, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);

        let main_loop = self.main_loop.clone();
        let sender = self.sender.clone();
        let stop = Arc::clone(&self.stop);
        let running = Arc::clone(&self.running);

        let worker = ThreadBuilder::new()
            .name("cursor-tracker".into())
            .spawn(move || {
                // Shared with the deferred jobs so dedup survives across
                // samples regardless of which tick runs them.
                let last_sent: Arc<Mutex<Option<CursorSample>>> = Arc::new(Mutex::new(None));

                while !stop.load(Ordering::SeqCst) {
                    let sender = sender.clone();
                    let last_sent = Arc::clone(&last_sent);
                    main_loop.submit(move |scene| {
                        let Some(sample) = scene.cursor_sample() else {
                            return;
                        };

                        let mut last = match last_sent.lock() {
                            Ok(guard) => guard,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        if last.as_ref() == Some(&sample) {
                            return;
                        }

                        sender.send(&cursor_event(&sample));
                        *last = Some(sample);
                    });
                    sleep(SAMPLE_INTERVAL);
                }
                running.store(false, Ordering::SeqCst);
                debug!("Cursor tracker stopped");
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                TransportError::Spawn {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        self.worker = Some(worker);
        Ok(())
    }

    /// Request worker termination; returns immediately.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

fn cursor_event(sample: &CursorSample) -> Event {
    Event::CursorTracked {
        object: sample.object.clone(),
        hit_position: sample.hit_position.map(|v| v.to_array()),
        normal: sample.normal.map(|v| v.to_array()),
        face_index: sample.face_index,
        cursor_position: sample.cursor_position.to_array(),
    }
}
