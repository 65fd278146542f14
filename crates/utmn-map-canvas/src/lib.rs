//! # UTMN Map Canvas
//!
//! The interactive floor canvas: viewport transform, hit-testing, edit modes,
//! route animation, icon loading and rendering. [`MapCanvas`] ties them to a
//! [`utmn_map_api::MapDataSource`] for one building.

pub mod canvas;
pub mod edit_mode;
pub mod font_manager;
pub mod icons;
pub mod render;
pub mod route;
pub mod viewport;

pub use canvas::{LoadState, MapCanvas, NewObjectForm, SelectedInfo, SelectionDetails};
pub use edit_mode::{EditMode, InteractionOutcome, MoveOverride, Selection};
pub use hit_test::{hit_object, hit_test, route_endpoint, Hit};
pub use icons::{FsIconLoader, IconCache, IconLoader, IconLookup};
pub use render::{
    DisplayList, DrawCommand, FloorRenderer, FrameInput, PixmapSurface, RecordingSurface, Rgba,
    StrokeStyle, Surface,
};
pub use route::{
    FrameScheduler, FrameTick, ManualFrameScheduler, NodeIndex, RouteAnimator, RouteTiming,
    TokioFrameScheduler,
};
pub use viewport::ViewportTransform;
