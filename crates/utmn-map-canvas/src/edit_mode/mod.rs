//! Edit modes and pointer interaction.
//!
//! Exactly one [`EditMode`] is active per canvas. Pointer events are routed to
//! the mode's [`ModeHandler`], which reads and writes the shared
//! [`InteractionState`] and reports what the canvas should do next through an
//! [`InteractionOutcome`].

mod gesture;
mod handlers;
mod state;

use std::fmt;
use std::str::FromStr;

use utmn_map_core::Point;

pub use gesture::{PinchGesture, TouchGesture};
pub use handlers::{
    handler_for, CreateHandler, HandlerContext, ModeHandler, MoveHandler, PolygonHandler,
    RouteHandler, SelectHandler,
};
pub use state::{InteractionState, MoveDrag, MoveOverride, PanDrag, Selection};

/// Editing mode of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditMode {
    #[default]
    Select,
    Create,
    Move,
    Route,
    Polygon,
}

impl EditMode {
    pub const ALL: [EditMode; 5] = [
        EditMode::Select,
        EditMode::Create,
        EditMode::Move,
        EditMode::Route,
        EditMode::Polygon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EditMode::Select => "select",
            EditMode::Create => "create",
            EditMode::Move => "move",
            EditMode::Route => "route",
            EditMode::Polygon => "polygon",
        }
    }

    /// Whether wheel and pinch zoom are honoured in this mode.
    pub fn allows_gesture_zoom(self) -> bool {
        self == EditMode::Select
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        EditMode::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .ok_or_else(|| format!("Unknown edit mode: {s}"))
    }
}

/// What the canvas should do after a pointer event.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionOutcome {
    #[default]
    None,
    Redraw,
    /// Create mode click: show the object form for this world position.
    OpenCreateForm(Point),
    /// Move drag released: persist the object at `(x, y)`.
    CommitMove { object_id: String, x: f64, y: f64 },
}

impl InteractionOutcome {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, InteractionOutcome::None)
    }
}
