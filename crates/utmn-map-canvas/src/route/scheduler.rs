//! Frame scheduling for the route animation.
//!
//! The animator never sleeps itself. It asks a [`FrameScheduler`] to start a
//! chain of frames for one route assignment and to cancel it again. Each
//! chain is tagged with the assignment's generation so that late frames from
//! a cancelled chain can be recognised and dropped.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use utmn_map_settings::AnimationSettings;

/// A frame request delivered by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    pub generation: u64,
}

/// Drives animation frames for at most one chain at a time.
pub trait FrameScheduler: Send {
    /// Start delivering frames for `generation`, replacing any running chain.
    fn start(&mut self, generation: u64);

    /// Stop the running chain, if any.
    fn cancel(&mut self);

    /// Generation of the running chain.
    fn active_generation(&self) -> Option<u64>;

    fn is_active(&self) -> bool {
        self.active_generation().is_some()
    }
}

#[derive(Debug, Default)]
struct ManualState {
    active: Option<u64>,
    started: Vec<u64>,
    cancelled: usize,
}

/// Scheduler for hosts that drive frames themselves, and for tests.
///
/// Clones share state, so a test can keep one handle while the animator owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every generation a chain was started for, in order.
    pub fn started(&self) -> Vec<u64> {
        self.state.lock().started.clone()
    }

    /// Number of cancel calls that stopped a running chain.
    pub fn cancelled(&self) -> usize {
        self.state.lock().cancelled
    }

    /// The frame a host should deliver next, if a chain is running.
    pub fn next_tick(&self) -> Option<FrameTick> {
        self.state
            .lock()
            .active
            .map(|generation| FrameTick { generation })
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn start(&mut self, generation: u64) {
        let mut state = self.state.lock();
        if state.active.take().is_some() {
            state.cancelled += 1;
        }
        state.active = Some(generation);
        state.started.push(generation);
    }

    fn cancel(&mut self) {
        let mut state = self.state.lock();
        if state.active.take().is_some() {
            state.cancelled += 1;
        }
    }

    fn active_generation(&self) -> Option<u64> {
        self.state.lock().active
    }
}

/// Scheduler backed by a tokio interval task per chain.
///
/// Ticks are sent on an unbounded channel; the owner of the receiver feeds
/// them back into the canvas. Without a running tokio runtime no chain is
/// started and the host has to tick manually.
pub struct TokioFrameScheduler {
    interval: Duration,
    sender: mpsc::UnboundedSender<FrameTick>,
    task: Option<(u64, JoinHandle<()>)>,
}

impl TokioFrameScheduler {
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<FrameTick>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                interval,
                sender,
                task: None,
            },
            receiver,
        )
    }

    /// Scheduler ticking at the configured frame interval.
    pub fn from_settings(
        settings: &AnimationSettings,
    ) -> (Self, mpsc::UnboundedReceiver<FrameTick>) {
        Self::new(Duration::from_millis(settings.frame_interval_ms))
    }
}

impl FrameScheduler for TokioFrameScheduler {
    fn start(&mut self, generation: u64) {
        self.cancel();

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No tokio runtime, frames for route {} must be driven manually", generation);
            return;
        };

        let sender = self.sender.clone();
        let period = self.interval;
        let task = handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if sender.send(FrameTick { generation }).is_err() {
                    break;
                }
            }
        });
        self.task = Some((generation, task));
    }

    fn cancel(&mut self) {
        if let Some((generation, task)) = self.task.take() {
            task.abort();
            tracing::trace!("Cancelled frame chain {}", generation);
        }
    }

    fn active_generation(&self) -> Option<u64> {
        self.task
            .as_ref()
            .filter(|(_, task)| !task.is_finished())
            .map(|(generation, _)| *generation)
    }
}

impl Drop for TokioFrameScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
