//! Per-mode pointer handlers.
//!
//! Handlers are stateless; everything that outlives one event lives in
//! [`InteractionState`] or the selection. Coordinates passed in are screen
//! pixels.

use utmn_map_core::{FloorPlan, Point};

use super::state::{InteractionState, MoveDrag, MoveOverride, PanDrag, Selection};
use super::{EditMode, InteractionOutcome};
use crate::hit_test::{hit_object, hit_test, Hit};
use crate::viewport::ViewportTransform;

/// Canvas state a handler may read or change.
pub struct HandlerContext<'a> {
    pub viewport: &'a mut ViewportTransform,
    pub floor: Option<&'a FloorPlan>,
    pub state: &'a mut InteractionState,
    pub selection: &'a mut Option<Selection>,
    pub click_slop: f64,
}

impl HandlerContext<'_> {
    fn world(&self, screen: Point) -> Point {
        self.viewport.to_world(screen.x, screen.y)
    }
}

pub trait ModeHandler {
    fn on_pointer_down(&self, _ctx: &mut HandlerContext<'_>, _screen: Point) -> InteractionOutcome {
        InteractionOutcome::None
    }

    fn on_pointer_move(&self, _ctx: &mut HandlerContext<'_>, _screen: Point) -> InteractionOutcome {
        InteractionOutcome::None
    }

    fn on_pointer_up(&self, _ctx: &mut HandlerContext<'_>, _screen: Point) -> InteractionOutcome {
        InteractionOutcome::None
    }

    fn on_click(&self, _ctx: &mut HandlerContext<'_>, _screen: Point) -> InteractionOutcome {
        InteractionOutcome::None
    }
}

/// Handler for `mode`.
pub fn handler_for(mode: EditMode) -> &'static dyn ModeHandler {
    match mode {
        EditMode::Select => &SelectHandler,
        EditMode::Create => &CreateHandler,
        EditMode::Move => &MoveHandler,
        EditMode::Route => &RouteHandler,
        EditMode::Polygon => &PolygonHandler,
    }
}

/// Pans on drag, selects on click.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectHandler;

impl ModeHandler for SelectHandler {
    fn on_pointer_down(&self, ctx: &mut HandlerContext<'_>, screen: Point) -> InteractionOutcome {
        ctx.state.pan = Some(PanDrag {
            last: screen,
            travelled: 0.0,
        });
        ctx.state.last_drag_travel = 0.0;
        InteractionOutcome::None
    }

    fn on_pointer_move(&self, ctx: &mut HandlerContext<'_>, screen: Point) -> InteractionOutcome {
        let Some(pan) = ctx.state.pan.as_mut() else {
            return InteractionOutcome::None;
        };
        let dx = screen.x - pan.last.x;
        let dy = screen.y - pan.last.y;
        pan.travelled += pan.last.distance_to(&screen);
        pan.last = screen;
        ctx.viewport.pan_by(dx, dy);
        InteractionOutcome::Redraw
    }

    fn on_pointer_up(&self, ctx: &mut HandlerContext<'_>, _screen: Point) -> InteractionOutcome {
        if let Some(pan) = ctx.state.pan.take() {
            ctx.state.last_drag_travel = pan.travelled;
        }
        InteractionOutcome::None
    }

    fn on_click(&self, ctx: &mut HandlerContext<'_>, screen: Point) -> InteractionOutcome {
        if ctx.state.last_drag_travel > ctx.click_slop {
            tracing::debug!(
                "Click ignored after {:.1}px drag",
                ctx.state.last_drag_travel
            );
            ctx.state.last_drag_travel = 0.0;
            return InteractionOutcome::None;
        }
        let Some(floor) = ctx.floor else {
            return InteractionOutcome::None;
        };
        let world = ctx.world(screen);
        let selection = match hit_test(world.x, world.y, floor) {
            Hit::Object(object) => Some(Selection::Object {
                id: object.id.clone(),
                origin: object.rect().origin(),
            }),
            Hit::Door { door, owner } => Some(Selection::Door {
                id: door.id.clone(),
                owner_id: owner.id.clone(),
                rect: door.rect(),
            }),
            Hit::None => None,
        };
        tracing::debug!(
            "Select at ({:.2}, {:.2}): {:?}",
            world.x,
            world.y,
            selection.as_ref().map(Selection::id)
        );
        *ctx.selection = selection;
        InteractionOutcome::Redraw
    }
}

/// Records a draft position and asks for the object form.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateHandler;

impl ModeHandler for CreateHandler {
    fn on_click(&self, ctx: &mut HandlerContext<'_>, screen: Point) -> InteractionOutcome {
        if ctx.floor.is_none() {
            return InteractionOutcome::None;
        }
        let world = ctx.world(screen);
        ctx.state.pending_draft = Some(world);
        tracing::debug!("Create draft at ({:.2}, {:.2})", world.x, world.y);
        InteractionOutcome::OpenCreateForm(world)
    }
}

/// Drags an object and asks for the new position to be persisted on release.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveHandler;

impl ModeHandler for MoveHandler {
    fn on_pointer_down(&self, ctx: &mut HandlerContext<'_>, screen: Point) -> InteractionOutcome {
        let Some(floor) = ctx.floor else {
            return InteractionOutcome::None;
        };
        let world = ctx.world(screen);
        let Some(object) = hit_object(world.x, world.y, floor) else {
            return InteractionOutcome::None;
        };
        tracing::debug!("Move grab on {}", object.id);
        ctx.state.move_drag = Some(MoveDrag {
            object_id: object.id.clone(),
            grab: Point::new(world.x - object.x, world.y - object.y),
        });
        ctx.state.move_override = Some(MoveOverride {
            object_id: object.id.clone(),
            x: object.x,
            y: object.y,
        });
        InteractionOutcome::None
    }

    fn on_pointer_move(&self, ctx: &mut HandlerContext<'_>, screen: Point) -> InteractionOutcome {
        let world = ctx.world(screen);
        let Some(drag) = ctx.state.move_drag.as_ref() else {
            return InteractionOutcome::None;
        };
        ctx.state.move_override = Some(MoveOverride {
            object_id: drag.object_id.clone(),
            x: world.x - drag.grab.x,
            y: world.y - drag.grab.y,
        });
        InteractionOutcome::Redraw
    }

    fn on_pointer_up(&self, ctx: &mut HandlerContext<'_>, _screen: Point) -> InteractionOutcome {
        let Some(drag) = ctx.state.move_drag.take() else {
            return InteractionOutcome::None;
        };
        match ctx.state.move_override.as_ref() {
            Some(o) if o.object_id == drag.object_id => InteractionOutcome::CommitMove {
                object_id: drag.object_id,
                x: o.x,
                y: o.y,
            },
            _ => InteractionOutcome::None,
        }
    }
}

/// Placeholder; route building is driven through the canvas API.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteHandler;

impl ModeHandler for RouteHandler {
    fn on_click(&self, ctx: &mut HandlerContext<'_>, screen: Point) -> InteractionOutcome {
        let world = ctx.world(screen);
        tracing::trace!("Route mode click at ({:.2}, {:.2})", world.x, world.y);
        InteractionOutcome::None
    }
}

/// Collects polygon vertices on click.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonHandler;

impl ModeHandler for PolygonHandler {
    fn on_click(&self, ctx: &mut HandlerContext<'_>, screen: Point) -> InteractionOutcome {
        if ctx.floor.is_none() {
            return InteractionOutcome::None;
        }
        let world = ctx.world(screen);
        ctx.state.polygon_points.push(world);
        tracing::debug!(
            "Polygon point {} at ({:.2}, {:.2})",
            ctx.state.polygon_points.len(),
            world.x,
            world.y
        );
        InteractionOutcome::Redraw
    }
}
