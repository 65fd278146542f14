use std::sync::Arc;
use std::time::Instant;

use utmn_map_api::MapDataSource;
use utmn_map_core::constants::MIN_POLYGON_POINTS;
use utmn_map_core::{
    BuildingSnapshot, EditError, FloorPlan, GraphNode, Intersection, LookupError, NewObject,
    NewPolygon, ObjectPatch, PlacedObject, Point, PolygonPoint, PolygonRecord, Result, Route,
    RouteRequest,
};
use utmn_map_settings::{Config, EditorSettings, ViewportSettings};

use super::details::SelectionDetails;
use super::{LoadState, NewObjectForm};
use crate::edit_mode::{
    handler_for, EditMode, HandlerContext, InteractionOutcome, InteractionState, ModeHandler,
    Selection, TouchGesture,
};
use crate::hit_test::{route_endpoint, Hit};
use crate::render::{DisplayList, FloorRenderer, FrameInput, Surface};
use crate::route::{
    FrameScheduler, FrameTick, ManualFrameScheduler, NodeIndex, RouteAnimator, RouteTiming,
};
use crate::viewport::ViewportTransform;

type EventFn = fn(&dyn ModeHandler, &mut HandlerContext<'_>, Point) -> InteractionOutcome;

/// One building on one canvas.
///
/// The snapshot is never edited in place. Every successful mutation is
/// followed by a refetch that replaces it; the only optimistic state is the
/// move override, which the renderer prefers while a move is in flight.
///
/// A mutation that the backend accepted is reported as a success even when
/// the refetch after it fails; the canvas is then marked stale until the next
/// successful refresh.
pub struct MapCanvas {
    source: Arc<dyn MapDataSource>,
    building_id: String,
    snapshot: Option<BuildingSnapshot>,
    graph_nodes: Vec<GraphNode>,
    intersections: Vec<Intersection>,
    nodes: NodeIndex,
    current_floor: Option<String>,
    mode: EditMode,
    viewport: ViewportTransform,
    interaction: InteractionState,
    touch: TouchGesture,
    selection: Option<Selection>,
    animator: RouteAnimator,
    load_state: LoadState,
    stale: bool,
    renderer: FloorRenderer,
    viewport_settings: ViewportSettings,
    editor: EditorSettings,
}

impl MapCanvas {
    pub fn new(
        source: Arc<dyn MapDataSource>,
        building_id: impl Into<String>,
        config: &Config,
    ) -> Result<Self> {
        let viewport = ViewportTransform::from_settings(
            &config.viewport,
            f64::from(config.render.surface_width),
            f64::from(config.render.surface_height),
        )?;
        Ok(Self {
            source,
            building_id: building_id.into(),
            snapshot: None,
            graph_nodes: Vec::new(),
            intersections: Vec::new(),
            nodes: NodeIndex::new(),
            current_floor: None,
            mode: EditMode::default(),
            viewport,
            interaction: InteractionState::new(),
            touch: TouchGesture::Idle,
            selection: None,
            animator: RouteAnimator::new(
                RouteTiming::from(&config.animation),
                Box::new(ManualFrameScheduler::new()),
            ),
            load_state: LoadState::Idle,
            stale: false,
            renderer: FloorRenderer::new(),
            viewport_settings: config.viewport.clone(),
            editor: config.editor.clone(),
        })
    }

    /// Replaces the frame scheduler used by the route animation.
    pub fn with_frame_scheduler(mut self, scheduler: Box<dyn FrameScheduler>) -> Self {
        let timing = self.animator.timing();
        self.animator = RouteAnimator::new(timing, scheduler);
        self
    }

    // Accessors

    pub fn building_id(&self) -> &str {
        &self.building_id
    }

    pub fn snapshot(&self) -> Option<&BuildingSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// True when the snapshot is known to lag behind a saved mutation.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn polygon_points(&self) -> &[Point] {
        &self.interaction.polygon_points
    }

    pub fn nodes(&self) -> &NodeIndex {
        &self.nodes
    }

    pub fn animator(&self) -> &RouteAnimator {
        &self.animator
    }

    pub fn route(&self) -> Option<&Route> {
        self.animator.route()
    }

    pub fn route_progress(&self) -> f64 {
        self.animator.progress()
    }

    pub fn current_floor_id(&self) -> Option<&str> {
        self.current_floor.as_deref()
    }

    pub fn current_floor(&self) -> Option<&FloorPlan> {
        let id = self.current_floor.as_deref()?;
        self.snapshot.as_ref()?.floor(id)
    }

    // Loading

    /// Fetches the snapshot and route graph and shows the first floor.
    pub async fn load(&mut self) -> Result<()> {
        self.load_state = LoadState::Loading;
        match self.fetch().await {
            Ok(()) => {
                self.load_state = LoadState::Ready;
                self.stale = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load building {}: {}", self.building_id, e);
                self.load_state = LoadState::Failed(e.user_message());
                Err(e)
            }
        }
    }

    /// Refetches after a mutation. On failure the previous snapshot stays.
    pub async fn refresh(&mut self) -> Result<()> {
        self.fetch().await.inspect_err(|e| {
            tracing::warn!("Failed to refresh building {}: {}", self.building_id, e);
        })?;
        self.load_state = LoadState::Ready;
        self.stale = false;
        Ok(())
    }

    /// Refetch following a mutation the backend already accepted. A failure
    /// here does not undo the mutation, so it is not the caller's error.
    async fn refresh_after_mutation(&mut self, action: &str) {
        if let Err(e) = self.refresh().await {
            tracing::warn!("{} saved but the map could not be refreshed: {}", action, e);
            self.stale = true;
        }
    }

    async fn fetch(&mut self) -> Result<()> {
        let snapshot = self.source.get_objects(&self.building_id).await?;

        // The route graph only feeds the overlay; a failure there keeps the
        // map usable.
        match self.source.get_graph_nodes(&self.building_id).await {
            Ok(nodes) => self.graph_nodes = nodes,
            Err(e) => tracing::warn!("Graph nodes unavailable: {}", e),
        }
        match self.source.get_intersections(&self.building_id).await {
            Ok(intersections) => self.intersections = intersections,
            Err(e) => tracing::warn!("Intersections unavailable: {}", e),
        }

        self.install_snapshot(snapshot);
        Ok(())
    }

    fn install_snapshot(&mut self, snapshot: BuildingSnapshot) {
        self.nodes = NodeIndex::build(&snapshot, &self.intersections, &self.graph_nodes);

        let keep = self
            .current_floor
            .as_deref()
            .is_some_and(|id| snapshot.floor(id).is_some());
        if !keep {
            let first = snapshot.first_floor().map(|f| f.id().to_string());
            if first != self.current_floor {
                self.clear_transient();
            }
            self.current_floor = first;
        }

        tracing::info!(
            "Building {} ready: {} floors, {} route nodes",
            snapshot.building.name,
            snapshot.floors.len(),
            self.nodes.len()
        );
        self.snapshot = Some(snapshot);
    }

    fn clear_transient(&mut self) {
        self.interaction.clear();
        self.touch = TouchGesture::Idle;
        self.selection = None;
    }

    // Floor and mode

    pub fn set_current_floor(&mut self, floor_id: &str) -> Result<()> {
        let snapshot = self.snapshot.as_ref().ok_or(EditError::NoBuilding)?;
        if snapshot.floor(floor_id).is_none() {
            return Err(LookupError::FloorNotFound {
                floor_id: floor_id.to_string(),
            }
            .into());
        }
        if self.current_floor.as_deref() != Some(floor_id) {
            tracing::debug!("Switching to floor {}", floor_id);
            self.current_floor = Some(floor_id.to_string());
            self.clear_transient();
        }
        Ok(())
    }

    /// Same as [`MapCanvas::set_current_floor`], addressing the floor by name.
    pub fn set_current_floor_by_name(&mut self, name: &str) -> Result<()> {
        let floor_id = self
            .snapshot
            .as_ref()
            .ok_or(EditError::NoBuilding)?
            .floor_by_name(name)
            .map(|f| f.id().to_string())
            .ok_or_else(|| LookupError::FloorNotFound {
                floor_id: name.to_string(),
            })?;
        self.set_current_floor(&floor_id)
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        if mode == self.mode {
            return;
        }
        tracing::debug!("Edit mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.clear_transient();
    }

    // Pointer input, screen coordinates

    fn dispatch(&mut self, screen: Point, event: EventFn) -> InteractionOutcome {
        let handler = handler_for(self.mode);
        let floor = match (&self.snapshot, &self.current_floor) {
            (Some(snapshot), Some(id)) => snapshot.floor(id),
            _ => None,
        };
        let mut ctx = HandlerContext {
            viewport: &mut self.viewport,
            floor,
            state: &mut self.interaction,
            selection: &mut self.selection,
            click_slop: self.viewport_settings.click_slop_px,
        };
        event(handler, &mut ctx, screen)
    }

    pub fn pointer_down(&mut self, sx: f64, sy: f64) -> InteractionOutcome {
        self.dispatch(Point::new(sx, sy), |h, ctx, p| h.on_pointer_down(ctx, p))
    }

    pub fn pointer_move(&mut self, sx: f64, sy: f64) -> InteractionOutcome {
        self.dispatch(Point::new(sx, sy), |h, ctx, p| h.on_pointer_move(ctx, p))
    }

    /// In move mode this yields [`InteractionOutcome::CommitMove`]; the host
    /// then awaits [`MapCanvas::commit_move`].
    pub fn pointer_up(&mut self, sx: f64, sy: f64) -> InteractionOutcome {
        self.dispatch(Point::new(sx, sy), |h, ctx, p| h.on_pointer_up(ctx, p))
    }

    pub fn click(&mut self, sx: f64, sy: f64) -> InteractionOutcome {
        self.dispatch(Point::new(sx, sy), |h, ctx, p| h.on_click(ctx, p))
    }

    /// Wheel zoom anchored at the cursor. Negative `delta_y` zooms in.
    pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) -> bool {
        if !self.mode.allows_gesture_zoom() {
            return false;
        }
        let step = self.viewport_settings.wheel_zoom_factor;
        let factor = if delta_y < 0.0 { step } else { 1.0 / step };
        self.viewport.zoom_at(sx, sy, factor);
        true
    }

    pub fn touch_start(&mut self, touches: &[Point]) -> bool {
        if !self.mode.allows_gesture_zoom() {
            self.touch = TouchGesture::Idle;
            return false;
        }
        self.touch = TouchGesture::begin(touches, &self.viewport);
        self.touch.is_active()
    }

    pub fn touch_move(&mut self, touches: &[Point]) -> bool {
        if !self.mode.allows_gesture_zoom() {
            return false;
        }
        self.touch.update(touches, &mut self.viewport)
    }

    /// `remaining` are the touches still down; the gesture restarts from them.
    pub fn touch_end(&mut self, remaining: &[Point]) {
        self.touch = if self.mode.allows_gesture_zoom() {
            TouchGesture::begin(remaining, &self.viewport)
        } else {
            TouchGesture::Idle
        };
    }

    // Viewport buttons

    pub fn zoom_in(&mut self) {
        self.viewport.step_zoom(self.viewport_settings.button_zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.step_zoom(-self.viewport_settings.button_zoom_step);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.viewport.set_surface_size(width, height);
    }

    // Mutations

    fn current_floor_or_err(&self) -> Result<&FloorPlan> {
        if self.snapshot.is_none() {
            return Err(EditError::NoBuilding.into());
        }
        self.current_floor()
            .ok_or_else(|| EditError::NoCurrentFloor.into())
    }

    /// Creates an object at the last create-mode click.
    pub async fn submit_create(&mut self, form: NewObjectForm) -> Result<PlacedObject> {
        let draft = self
            .interaction
            .pending_draft
            .ok_or(EditError::NoPendingDraft)?;
        let floor = self.current_floor_or_err()?.floor.clone();
        let object = NewObject {
            id: None,
            name: form.name,
            alias: form.alias,
            description: form.description,
            x: draft.x,
            y: draft.y,
            width: self.editor.default_object_width,
            height: self.editor.default_object_height,
            object_type_id: form.object_type.id(),
        };

        let created = self
            .source
            .create_object(&self.building_id, &floor, &object)
            .await
            .inspect_err(|e| tracing::warn!("Create object failed: {}", e))?;
        tracing::info!("Created object {} on floor {}", created.id, floor.name);

        self.interaction.pending_draft = None;
        self.refresh_after_mutation("Created object").await;
        Ok(created)
    }

    /// Persists the moved object with its full record and the dragged
    /// position. The override is dropped whether or not the update succeeds.
    pub async fn commit_move(&mut self) -> Result<PlacedObject> {
        let pending = self
            .interaction
            .move_override
            .clone()
            .ok_or(EditError::NothingToCommit)?;
        let snapshot = self.snapshot.as_ref().ok_or(EditError::NoBuilding)?;
        let Some((floor, object)) = snapshot.find_object(&pending.object_id) else {
            self.interaction.move_override = None;
            return Err(LookupError::ObjectNotFound {
                object_id: pending.object_id,
            }
            .into());
        };
        let floor = floor.floor.clone();
        let patch = ObjectPatch::from_object(object).with_position(pending.x, pending.y);

        let result = self
            .source
            .update_object(&self.building_id, &floor, &pending.object_id, &patch)
            .await;
        self.interaction.move_override = None;

        let updated = result.inspect_err(|e| {
            tracing::warn!("Move of {} not saved: {}", pending.object_id, e);
        })?;
        tracing::info!(
            "Moved object {} to ({:.2}, {:.2})",
            updated.id,
            pending.x,
            pending.y
        );
        self.refresh_after_mutation("Moved object").await;
        Ok(updated)
    }

    /// Saves the collected polygon as a floor background and returns to
    /// select mode.
    pub async fn finish_polygon(&mut self) -> Result<PolygonRecord> {
        let count = self.interaction.polygon_points.len();
        if count < MIN_POLYGON_POINTS {
            return Err(EditError::NotEnoughPolygonPoints { count }.into());
        }
        let floor = self.current_floor_or_err()?.floor.clone();
        let polygon = NewPolygon {
            label: format!("Floor background {}", floor.name),
            z_index: self.editor.polygon_z_index,
        };

        let record = self
            .source
            .create_polygon(&self.building_id, &floor, &polygon)
            .await
            .inspect_err(|e| tracing::warn!("Create polygon failed: {}", e))?;
        let points = PolygonPoint::sequence(&self.interaction.polygon_points);
        self.source
            .add_polygon_points(&self.building_id, &floor, &record.id, &points)
            .await
            .inspect_err(|e| tracing::warn!("Adding points to {} failed: {}", record.id, e))?;
        tracing::info!(
            "Created polygon {} with {} points on floor {}",
            record.id,
            points.len(),
            floor.name
        );

        self.interaction.polygon_points.clear();
        self.set_mode(EditMode::Select);
        self.refresh_after_mutation("Polygon").await;
        Ok(record)
    }

    // Routes

    /// Graph node a route can start or end at for the current selection.
    pub fn selection_endpoint(&self) -> Result<String> {
        let snapshot = self.snapshot.as_ref().ok_or(EditError::NoBuilding)?;
        let hit = match &self.selection {
            Some(Selection::Object { id, .. }) => snapshot
                .find_object(id)
                .map_or(Hit::None, |(_, object)| Hit::Object(object)),
            Some(Selection::Door { id, .. }) => snapshot
                .find_door(id)
                .map_or(Hit::None, |(_, owner, door)| Hit::Door { door, owner }),
            None => Hit::None,
        };
        Ok(route_endpoint(&hit)?)
    }

    /// Asks the backend for a route between two known graph nodes and starts
    /// displaying it.
    pub async fn build_route(&mut self, start_node_id: &str, end_node_id: &str) -> Result<Route> {
        for node_id in [start_node_id, end_node_id] {
            if self.nodes.resolve(node_id).is_none() {
                return Err(LookupError::NodeNotFound {
                    node_id: node_id.to_string(),
                }
                .into());
            }
        }
        let request = RouteRequest::new(start_node_id, end_node_id);
        let route = self
            .source
            .build_route(&self.building_id, &request)
            .await
            .inspect_err(|e| tracing::warn!("Route request failed: {}", e))?;
        tracing::info!(
            "Route {} -> {}: {} edges",
            start_node_id,
            end_node_id,
            route.len()
        );
        self.set_route(Some(route.clone()));
        Ok(route)
    }

    /// Shows `route`, restarting the reveal animation.
    pub fn set_route(&mut self, route: Option<Route>) {
        self.set_route_at(route, Instant::now());
    }

    pub fn set_route_at(&mut self, route: Option<Route>, now: Instant) {
        self.animator.set_route(route, now);
    }

    pub fn clear_route(&mut self) {
        self.set_route(None);
    }

    pub fn tick_animation(&mut self) -> f64 {
        self.tick_animation_at(Instant::now())
    }

    pub fn tick_animation_at(&mut self, now: Instant) -> f64 {
        self.animator.tick(now)
    }

    /// Handles a frame from the scheduler. Returns whether a redraw is due.
    pub fn on_frame(&mut self, tick: FrameTick) -> bool {
        self.animator.on_frame(tick, Instant::now())
    }

    /// Shows the whole route immediately.
    pub fn finish_route_animation(&mut self) {
        self.animator.finish();
    }

    // Output

    pub fn render_frame(&self) -> DisplayList {
        let frame = FrameInput {
            floor: self.current_floor(),
            viewport: &self.viewport,
            mode: self.mode,
            selected_origin: self.selection.as_ref().and_then(Selection::highlight_origin),
            move_override: self
                .interaction
                .move_override
                .as_ref()
                .map(|o| (o.object_id.as_str(), o.origin())),
            route: self.animator.route(),
            route_progress: self.animator.progress(),
            nodes: &self.nodes,
            polygon_points: &self.interaction.polygon_points,
        };
        self.renderer.render(&frame)
    }

    pub fn render_to(&self, surface: &mut dyn Surface) {
        surface.execute(&self.render_frame());
    }

    pub fn selection_details(&self) -> Option<SelectionDetails> {
        let snapshot = self.snapshot.as_ref()?;
        SelectionDetails::describe(snapshot, self.selection.as_ref()?)
    }

    /// Stops the frame chain and drops in-progress interaction.
    pub fn teardown(&mut self) {
        self.animator.teardown();
        self.clear_transient();
        tracing::debug!("Canvas for building {} torn down", self.building_id);
    }
}
