//! Deferred main-thread bridge.
//!
//! Host state (scene graph, visibility, selection, viewport) may only be
//! mutated from the host's cooperative main loop. Command handlers run on
//! the receiver's worker thread, so instead of touching the scene they
//! submit zero-argument closures here; the host drains them by calling
//! [`MainLoop::tick`] from its own loop.
//!
//! Guarantees:
//!
//! - submission is thread-safe and never blocks the submitter
//! - a job runs exactly once, on the ticking thread, strictly after the
//!   tick that was active when it was submitted
//! - due jobs run in submission order (single FIFO queue, single consumer)

use crate::scene::HostScene;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver as ChannelReceiver, Sender as ChannelSender, unbounded};
use log::warn;

/// A closure waiting to run on the main loop.
type Job = Box<dyn FnOnce(&mut dyn HostScene) + Send + 'static>;

struct DeferredTask {
    due: Instant,
    job: Job,
}

/// Thread-safe submission side of the bridge. Cheap to clone; every clone
/// feeds the same FIFO queue.
#[derive(Clone)]
pub struct MainLoopHandle {
    queue: ChannelSender<DeferredTask>,
}

impl MainLoopHandle {
    /// Schedule `job` for the next idle tick.
    pub fn submit(&self, job: impl FnOnce(&mut dyn HostScene) + Send + 'static) {
        self.submit_after(Duration::ZERO, job);
    }

    /// Schedule `job` to run on the first tick at or after `delay` from now.
    pub fn submit_after(
        &self,
        delay: Duration,
        job: impl FnOnce(&mut dyn HostScene) + Send + 'static,
    ) {
        let task = DeferredTask {
            due: Instant::now() + delay,
            job: Box::new(job),
        };
        if self.queue.send(task).is_err() {
            warn!("Main loop is gone; dropping deferred task");
        }
    }
}

/// Consumer side of the bridge, owned by the host's main loop.
pub struct MainLoop {
    queue: ChannelReceiver<DeferredTask>,
    pending: VecDeque<DeferredTask>,
}

impl MainLoop {
    /// Create the bridge pair.
    pub fn channel() -> (MainLoop, MainLoopHandle) {
        let (sender, receiver) = unbounded();
        (
            MainLoop {
                queue: receiver,
                pending: VecDeque::new(),
            },
            MainLoopHandle { queue: sender },
        )
    }

    /// Run every due task against the host scene. Returns how many ran.
    ///
    /// Tasks submitted while this tick is executing are picked up on the
    /// next tick, never the current one.
    pub fn tick(&mut self, scene: &mut dyn HostScene) -> usize {
        while let Ok(task) = self.queue.try_recv() {
            self.pending.push_back(task);
        }

        let now = Instant::now();
        let mut ran = 0;
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= now {
                if let Some(task) = self.pending.remove(index) {
                    (task.job)(scene);
                    ran += 1;
                }
            } else {
                index += 1;
            }
        }
        ran
    }

    /// True when no submitted task is waiting to run.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.queue.is_empty()
    }
}
