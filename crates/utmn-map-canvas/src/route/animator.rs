//! Progressive reveal of the displayed route.

use std::time::{Duration, Instant};

use utmn_map_core::constants::{ROUTE_ANIMATION_BASE_MS, ROUTE_ANIMATION_PER_EDGE_MS};
use utmn_map_core::Route;
use utmn_map_settings::AnimationSettings;

use super::scheduler::{FrameScheduler, FrameTick, ManualFrameScheduler};

/// Duration model: `base + per_edge * edge_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTiming {
    pub base: Duration,
    pub per_edge: Duration,
}

impl RouteTiming {
    pub fn duration_for(&self, edge_count: usize) -> Duration {
        self.base + self.per_edge * edge_count as u32
    }
}

impl Default for RouteTiming {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(ROUTE_ANIMATION_BASE_MS),
            per_edge: Duration::from_millis(ROUTE_ANIMATION_PER_EDGE_MS),
        }
    }
}

impl From<&AnimationSettings> for RouteTiming {
    fn from(settings: &AnimationSettings) -> Self {
        Self {
            base: Duration::from_millis(settings.base_duration_ms),
            per_edge: Duration::from_millis(settings.per_edge_ms),
        }
    }
}

/// Owns the displayed route and its reveal progress.
///
/// Every call to [`RouteAnimator::set_route`] is a new assignment, even for
/// an identical route: progress restarts at zero and the previous frame chain
/// is cancelled before a new one starts.
pub struct RouteAnimator {
    route: Option<Route>,
    generation: u64,
    started_at: Option<Instant>,
    duration: Duration,
    progress: f64,
    timing: RouteTiming,
    scheduler: Box<dyn FrameScheduler>,
}

impl RouteAnimator {
    pub fn new(timing: RouteTiming, scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            route: None,
            generation: 0,
            started_at: None,
            duration: Duration::ZERO,
            progress: 1.0,
            timing,
            scheduler,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.progress < 1.0 && self.started_at.is_some()
    }

    pub fn timing(&self) -> RouteTiming {
        self.timing
    }

    /// Assigns a new route (or clears it) and restarts the animation.
    pub fn set_route(&mut self, route: Option<Route>, now: Instant) {
        self.scheduler.cancel();
        self.generation += 1;

        match route {
            Some(route) if !route.is_empty() => {
                self.duration = self.timing.duration_for(route.len());
                self.route = Some(route);
                self.progress = 0.0;
                self.started_at = Some(now);
                self.scheduler.start(self.generation);
                tracing::debug!(
                    "Route animation {} started over {:?}",
                    self.generation,
                    self.duration
                );
            }
            other => {
                self.route = other;
                self.progress = 1.0;
                self.started_at = None;
                self.duration = Duration::ZERO;
            }
        }
    }

    /// Advances progress to `now`. Scheduling stops once progress reaches 1.
    pub fn tick(&mut self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return self.progress;
        };
        let elapsed = now.saturating_duration_since(started_at);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        // Never move backwards even if the host hands us an older instant.
        self.progress = self.progress.max(progress);
        if self.progress >= 1.0 {
            self.started_at = None;
            self.scheduler.cancel();
        }
        self.progress
    }

    /// Handles a scheduled frame. Frames from an older assignment are ignored
    /// and return `false`.
    pub fn on_frame(&mut self, tick: FrameTick, now: Instant) -> bool {
        if tick.generation != self.generation {
            tracing::trace!(
                "Dropping stale frame {} (current {})",
                tick.generation,
                self.generation
            );
            return false;
        }
        self.tick(now);
        true
    }

    /// Reveals the whole route at once.
    pub fn finish(&mut self) {
        self.scheduler.cancel();
        self.started_at = None;
        self.progress = 1.0;
    }

    /// Cancels scheduling. Called when the canvas goes away.
    pub fn teardown(&mut self) {
        self.scheduler.cancel();
        self.started_at = None;
    }
}

impl Default for RouteAnimator {
    fn default() -> Self {
        Self::new(
            RouteTiming::default(),
            Box::new(ManualFrameScheduler::new()),
        )
    }
}

impl Drop for RouteAnimator {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}
