//! Route display: node resolution, reveal animation and frame scheduling.

mod animator;
mod node_index;
mod scheduler;

pub use animator::{RouteAnimator, RouteTiming};
pub(crate) use node_index::reveal;
pub use node_index::{NodeIndex, NodeSource, ResolvedNode, RouteSegment};
pub use scheduler::{FrameScheduler, FrameTick, ManualFrameScheduler, TokioFrameScheduler};
