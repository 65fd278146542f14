use utmn_map_core::{Point, Rect};

/// Current selection on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Highlighted by matching the object's top-left corner.
    Object { id: String, origin: Point },
    Door {
        id: String,
        owner_id: String,
        rect: Rect,
    },
}

impl Selection {
    pub fn id(&self) -> &str {
        match self {
            Selection::Object { id, .. } | Selection::Door { id, .. } => id,
        }
    }

    /// Origin used for the object highlight. Doors highlight nothing.
    pub fn highlight_origin(&self) -> Option<Point> {
        match self {
            Selection::Object { origin, .. } => Some(*origin),
            Selection::Door { .. } => None,
        }
    }
}

/// Pending position of an object being moved, preferred over the snapshot by
/// the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOverride {
    pub object_id: String,
    pub x: f64,
    pub y: f64,
}

impl MoveOverride {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pan drag in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanDrag {
    pub last: Point,
    pub travelled: f64,
}

/// Object drag; `grab` is the cursor offset from the object's top-left corner
/// in world units.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveDrag {
    pub object_id: String,
    pub grab: Point,
}

/// Transient interaction state shared by the mode handlers.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub pan: Option<PanDrag>,
    /// Travel of the last finished pan drag; a click after a longer drag is
    /// not a click.
    pub last_drag_travel: f64,
    pub move_drag: Option<MoveDrag>,
    pub move_override: Option<MoveOverride>,
    pub polygon_points: Vec<Point>,
    pub pending_draft: Option<Point>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything in progress. Used on mode and floor changes.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_dragging(&self) -> bool {
        self.pan.is_some() || self.move_drag.is_some()
    }
}
