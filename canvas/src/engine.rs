//! Editor session: the interaction controller for one image slot.
//!
//! [`EditorSession`] owns a slot's transform, annotations, tool/selection
//! state and the gesture state machine. It has no browser dependencies; input
//! handlers return [`Action`]s for the host to carry out (redraw, publish a
//! toolbar snapshot, open the text prompt, schedule an animation frame).
//! [`Engine`] wraps a session with the browser canvas it draws on.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::broadcast::{EditorSnapshot, FrameThrottle, SelectedInfo};
use crate::consts::{
    DRAG_THRESHOLD_PX, EDITOR_HEIGHT, EDITOR_WIDTH, ICON_SIZE_STEP, TEXT_PADDING, TEXT_SIZE_STEP, ZOOM_STEP,
};
use crate::doc::{Annotation, AnnotationStore, IconKind};
use crate::hit;
use crate::input::{Button, InputState, Key, Tool, UiState, WheelDelta};
use crate::state::{self, SlotState};
use crate::text;
use crate::transform::{Point, Transform};
use crate::viewport::{LogicalViewport, Viewport};

#[cfg(feature = "web")]
pub use web::{Engine, SaveOutput};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The canvas must be redrawn.
    RenderNeeded,
    /// Publish this snapshot to the toolbar.
    StateChanged(EditorSnapshot),
    /// Call [`EditorSession::on_animation_frame`] on the next frame.
    FrameRequested,
    /// The text tool was clicked here; prompt for text, then call
    /// [`EditorSession::add_text_at`].
    TextRequested { x: f64, y: f64 },
    /// Set the canvas CSS cursor.
    SetCursor(&'static str),
    /// Show a failure message to the user.
    Notify(String),
}

/// All editing state for one slot.
pub struct EditorSession {
    pub store: AnnotationStore,
    pub transform: Transform,
    pub ui: UiState,
    pub input: InputState,
    saved_transform: Option<Transform>,
    image_size: Option<(f64, f64)>,
    viewport: Box<dyn Viewport>,
    throttle: FrameThrottle,
    last_pointer: Point,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            store: AnnotationStore::new(),
            transform: Transform::default(),
            ui: UiState::default(),
            input: InputState::default(),
            saved_transform: None,
            image_size: None,
            viewport: Box::new(LogicalViewport),
            throttle: FrameThrottle::new(),
            last_pointer: Point::new(0.0, 0.0),
        }
    }
}

impl EditorSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a session from saved slot state. The saved transform is
    /// applied when the image loads.
    #[must_use]
    pub fn from_state(state: SlotState) -> Self {
        Self {
            store: AnnotationStore::from_vec(state.annotations),
            saved_transform: state.transform,
            ..Self::default()
        }
    }

    /// Restore a slot from its blob state and its `image{N}-transform` field.
    ///
    /// A readable transform field wins over the blob's transform; an
    /// unreadable or empty one is ignored.
    #[must_use]
    pub fn open_slot(mut saved: SlotState, transform_field: Option<&str>) -> Self {
        if let Some(t) = transform_field.and_then(state::parse_transform_lenient) {
            saved.transform = Some(t);
        }
        Self::from_state(saved)
    }

    /// The slot's image was removed: drop annotations, selection and view.
    pub fn remove_image(&mut self) -> Vec<Action> {
        self.store.clear();
        self.ui.selected_id = None;
        self.input = InputState::default();
        self.throttle = FrameThrottle::new();
        self.image_size = None;
        self.saved_transform = None;
        self.transform = Transform::default();
        vec![self.state_changed(), Action::RenderNeeded]
    }

    /// Replace the pointer-to-canvas mapping.
    pub fn set_viewport<V: Viewport + 'static>(&mut self, viewport: V) {
        self.viewport = Box::new(viewport);
    }

    fn canvas_point(&self, client: Point) -> Point {
        self.viewport.to_canvas(client)
    }

    // --- Image and transform ---

    /// The source image finished loading at `width` x `height` pixels.
    ///
    /// Uses the saved transform if there is one, otherwise cover-fits.
    pub fn load_image(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.image_size = Some((width, height));
        self.transform = self
            .saved_transform
            .take()
            .unwrap_or_else(|| Transform::fit_cover(EDITOR_WIDTH, EDITOR_HEIGHT, width, height));
        vec![Action::RenderNeeded]
    }

    /// Natural size of the loaded image, if any.
    #[must_use]
    pub fn image_size(&self) -> Option<(f64, f64)> {
        self.image_size
    }

    /// Cover-fit and centre the loaded image again.
    pub fn reset_fit(&mut self) -> Vec<Action> {
        let Some((w, h)) = self.image_size else {
            return Vec::new();
        };
        self.transform = Transform::fit_cover(EDITOR_WIDTH, EDITOR_HEIGHT, w, h);
        vec![Action::RenderNeeded]
    }

    /// Toolbar zoom in, about the canvas centre.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_center(ZOOM_STEP)
    }

    /// Toolbar zoom out, about the canvas centre.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_center(-ZOOM_STEP)
    }

    fn zoom_center(&mut self, delta: f64) -> Vec<Action> {
        if self.transform.zoom_at(EDITOR_WIDTH / 2.0, EDITOR_HEIGHT / 2.0, delta) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Tool and selection ---

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        let cursor = if tool.is_placement() { "crosshair" } else { "default" };
        vec![Action::SetCursor(cursor), self.state_changed()]
    }

    /// The currently selected annotation id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    /// The currently selected annotation, if it still exists.
    #[must_use]
    pub fn selected(&self) -> Option<&Annotation> {
        self.selection().and_then(|id| self.store.get(id))
    }

    /// Topmost annotation under a client point.
    #[must_use]
    pub fn hit_test(&self, client: Point) -> Option<&Annotation> {
        hit::hit_test(&self.store, self.canvas_point(client))
    }

    /// Snapshot for the toolbar.
    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            tool: self.ui.tool.name().to_owned(),
            selected: self.selected().map(SelectedInfo::from),
            dragging: matches!(self.input, InputState::DraggingAnnotation { .. }),
        }
    }

    fn state_changed(&self) -> Action {
        Action::StateChanged(self.snapshot())
    }

    fn select(&mut self, id: Option<String>) -> Vec<Action> {
        self.ui.selected_id = id;
        vec![self.state_changed(), Action::RenderNeeded]
    }

    /// Deselect without touching the tool.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        if self.ui.selected_id.is_none() {
            return Vec::new();
        }
        self.select(None)
    }

    // --- Creation ---

    /// Append an icon centred at `(x, y)` and select it.
    pub fn add_icon(&mut self, tool: IconKind, x: f64, y: f64) -> Vec<Action> {
        let annotation = Annotation::icon(tool, x, y);
        let id = annotation.id().to_owned();
        self.store.push(annotation);
        self.select(Some(id))
    }

    /// Append text anchored near `(x, y)` and select it.
    ///
    /// The anchor is pulled inward so the estimated box stays on the canvas.
    /// Blank text creates nothing.
    pub fn add_text_at(&mut self, x: f64, y: f64, text: &str) -> Vec<Action> {
        if text::is_blank(text) {
            log::debug!("discarding blank text annotation");
            return Vec::new();
        }
        let mut annotation = Annotation::text(text, 0.0, 0.0);
        let (w, h) = text::estimated_block(text, annotation.size());
        let max_x = (EDITOR_WIDTH - w - TEXT_PADDING).max(TEXT_PADDING);
        let max_y = (EDITOR_HEIGHT - h - TEXT_PADDING).max(TEXT_PADDING);
        let anchor = Point::new(x.max(TEXT_PADDING).min(max_x), y.max(TEXT_PADDING).min(max_y));
        annotation.set_position(anchor);
        let id = annotation.id().to_owned();
        self.store.push(annotation);
        self.select(Some(id))
    }

    // --- Mutations on the selection ---

    fn with_selected<F>(&mut self, f: F) -> Vec<Action>
    where
        F: FnOnce(&mut Annotation) -> bool,
    {
        let Some(id) = self.ui.selected_id.clone() else {
            return Vec::new();
        };
        let Some(annotation) = self.store.get_mut(&id) else {
            return Vec::new();
        };
        if f(annotation) {
            vec![Action::RenderNeeded, self.state_changed()]
        } else {
            Vec::new()
        }
    }

    /// Grow or shrink the selection within its kind's size range.
    pub fn change_size(&mut self, delta: f64) -> Vec<Action> {
        self.with_selected(|a| {
            a.change_size(delta);
            true
        })
    }

    /// One size step up, using the step for the selection's kind.
    pub fn grow(&mut self) -> Vec<Action> {
        let step = self.size_step();
        self.change_size(step)
    }

    /// One size step down.
    pub fn shrink(&mut self) -> Vec<Action> {
        let step = self.size_step();
        self.change_size(-step)
    }

    fn size_step(&self) -> f64 {
        match self.selected() {
            Some(Annotation::Text(_)) => TEXT_SIZE_STEP,
            _ => ICON_SIZE_STEP,
        }
    }

    /// Rotate the selected icon by 45 degrees.
    pub fn rotate(&mut self) -> Vec<Action> {
        self.with_selected(Annotation::rotate)
    }

    /// Remove the selection from the store.
    pub fn delete(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id.take() else {
            return Vec::new();
        };
        self.store.remove(&id);
        vec![Action::RenderNeeded, self.state_changed()]
    }

    /// Replace the selected text annotation's content.
    ///
    /// Blank text soft-deletes it: it stays in the store but is no longer
    /// drawn or hittable, so the selection is cleared.
    pub fn update_text(&mut self, new_text: &str) -> Vec<Action> {
        let mut actions = self.with_selected(|a| match a {
            Annotation::Text(t) => {
                new_text.clone_into(&mut t.text);
                true
            }
            Annotation::Icon(_) => false,
        });
        if !actions.is_empty() && text::is_blank(new_text) {
            actions.extend(self.clear_selection());
        }
        actions
    }

    // --- Pointer input ---

    /// Mouse or single-touch press at a client point.
    pub fn on_pointer_down(&mut self, client: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let p = self.canvas_point(client);
        self.press(p)
    }

    /// Pointer move at a client point.
    pub fn on_pointer_move(&mut self, client: Point) -> Vec<Action> {
        let p = self.canvas_point(client);
        self.drag(p)
    }

    /// Pointer release at a client point.
    pub fn on_pointer_up(&mut self, client: Point) -> Vec<Action> {
        let p = self.canvas_point(client);
        self.release(p)
    }

    /// The browser cancelled the pointer; abandon any gesture in place.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let was_dragging = matches!(self.input, InputState::DraggingAnnotation { .. });
        self.input = InputState::Idle;
        self.throttle.cancel();
        let mut actions = vec![Action::SetCursor("default")];
        if was_dragging {
            actions.push(self.state_changed());
        }
        actions
    }

    fn press(&mut self, p: Point) -> Vec<Action> {
        self.last_pointer = p;
        let hit = hit::hit_test(&self.store, p).map(|a| (a.id().to_owned(), a.position()));
        if let Some((id, pos)) = hit {
            self.input = InputState::DraggingAnnotation { id: id.clone(), offset: Point::new(p.x - pos.x, p.y - pos.y) };
            let mut actions = self.select(Some(id));
            actions.push(Action::SetCursor("grabbing"));
            return actions;
        }
        self.input = InputState::PendingPan { start: p, anchor: self.transform.pan_anchor(p) };
        self.clear_selection()
    }

    fn drag(&mut self, p: Point) -> Vec<Action> {
        self.last_pointer = p;
        match &self.input {
            InputState::Idle | InputState::PinchZooming { .. } => Vec::new(),
            InputState::PendingPan { start, anchor } => {
                let (start, anchor) = (*start, *anchor);
                let moved = (p.x - start.x).abs() > DRAG_THRESHOLD_PX || (p.y - start.y).abs() > DRAG_THRESHOLD_PX;
                if !moved {
                    return Vec::new();
                }
                self.input = InputState::Panning { anchor };
                self.transform.pan_to(p, anchor);
                vec![Action::SetCursor("grabbing"), Action::RenderNeeded]
            }
            InputState::Panning { anchor } => {
                let anchor = *anchor;
                self.transform.pan_to(p, anchor);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingAnnotation { id, offset } => {
                let (id, offset) = (id.clone(), *offset);
                if let Some(a) = self.store.get_mut(&id) {
                    a.set_position(Point::new(p.x - offset.x, p.y - offset.y));
                }
                let mut actions = vec![Action::RenderNeeded];
                if self.throttle.offer(self.snapshot()) {
                    actions.push(Action::FrameRequested);
                }
                actions
            }
        }
    }

    fn release(&mut self, p: Point) -> Vec<Action> {
        self.last_pointer = p;
        match std::mem::take(&mut self.input) {
            InputState::PendingPan { .. } => self.click(p),
            InputState::DraggingAnnotation { .. } => {
                self.throttle.cancel();
                vec![self.state_changed(), Action::SetCursor("default")]
            }
            InputState::Panning { .. } => vec![Action::SetCursor("default")],
            InputState::Idle | InputState::PinchZooming { .. } => Vec::new(),
        }
    }

    /// A press and release on the background without a drag.
    fn click(&mut self, p: Point) -> Vec<Action> {
        match self.ui.tool {
            Tool::Select => Vec::new(),
            Tool::Icon(kind) => self.add_icon(kind, p.x, p.y),
            Tool::Text => vec![Action::TextRequested { x: p.x, y: p.y }],
        }
    }

    /// Wheel zoom about the pointer, one step per event.
    pub fn on_wheel(&mut self, client: Point, delta: WheelDelta) -> Vec<Action> {
        if delta.dy.abs() < f64::EPSILON {
            return Vec::new();
        }
        let p = self.canvas_point(client);
        let step = if delta.dy < 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
        if self.transform.zoom_at(p.x, p.y, step) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Keyboard shortcuts for the selection and tool.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete(),
            "Escape" => {
                self.ui.tool = Tool::Select;
                self.ui.selected_id = None;
                vec![Action::SetCursor("default"), self.state_changed(), Action::RenderNeeded]
            }
            "+" | "=" => self.grow(),
            "-" | "_" => self.shrink(),
            "r" | "R" => self.rotate(),
            _ => Vec::new(),
        }
    }

    // --- Touch input ---

    /// Touches currently down after a `touchstart`, in client space.
    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        match touches {
            [] => Vec::new(),
            [one] => self.on_pointer_down(*one, Button::Primary),
            [a, b, ..] => {
                let (a, b) = (self.canvas_point(*a), self.canvas_point(*b));
                self.start_pinch(a, b)
            }
        }
    }

    /// Touches currently down after a `touchmove`.
    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        match touches {
            [] => Vec::new(),
            [one] => self.on_pointer_move(*one),
            [a, b, ..] => {
                let (a, b) = (self.canvas_point(*a), self.canvas_point(*b));
                self.update_pinch(a, b)
            }
        }
    }

    /// Touches still down after a `touchend`.
    pub fn on_touch_end(&mut self, remaining: &[Point]) -> Vec<Action> {
        let pinching = matches!(self.input, InputState::PinchZooming { .. });
        match (pinching, remaining) {
            (true, []) => {
                self.input = InputState::Idle;
                Vec::new()
            }
            (true, [one]) => {
                let p = self.canvas_point(*one);
                self.last_pointer = p;
                self.input = InputState::Panning { anchor: self.transform.pan_anchor(p) };
                Vec::new()
            }
            (true, [a, b, ..]) => {
                let (a, b) = (self.canvas_point(*a), self.canvas_point(*b));
                self.start_pinch(a, b)
            }
            (false, []) => self.release(self.last_pointer),
            (false, _) => Vec::new(),
        }
    }

    fn start_pinch(&mut self, a: Point, b: Point) -> Vec<Action> {
        let was_dragging = matches!(self.input, InputState::DraggingAnnotation { .. });
        self.throttle.cancel();
        self.input = InputState::PinchZooming {
            start_dist: a.distance(b),
            start_mid: a.midpoint(b),
            start_transform: self.transform,
        };
        if was_dragging { vec![self.state_changed()] } else { Vec::new() }
    }

    fn update_pinch(&mut self, a: Point, b: Point) -> Vec<Action> {
        let InputState::PinchZooming { start_dist, start_mid, start_transform } = self.input else {
            return Vec::new();
        };
        if start_dist <= 0.0 {
            return Vec::new();
        }
        // Zoom about the starting midpoint, then follow the fingers.
        let mut t = start_transform;
        t.zoom_by_factor(start_mid.x, start_mid.y, a.distance(b) / start_dist);
        let mid = a.midpoint(b);
        t.x += mid.x - start_mid.x;
        t.y += mid.y - start_mid.y;
        self.transform = t;
        vec![Action::RenderNeeded]
    }

    // --- Frame and persistence ---

    /// Release the coalesced drag snapshot, if one is waiting.
    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        self.throttle.flush().map(Action::StateChanged).into_iter().collect()
    }

    /// State to persist: the live transform once an image is loaded, and
    /// every visible annotation.
    #[must_use]
    pub fn to_state(&self) -> SlotState {
        let transform = if self.image_size.is_some() { Some(self.transform) } else { self.saved_transform };
        SlotState { transform, annotations: self.store.to_saved() }
    }
}

#[cfg(feature = "web")]
mod web {
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlCanvasElement, HtmlImageElement};

    use super::{Action, EditorSession};
    use crate::assets::IconAtlas;
    use crate::config::EditorConfig;
    use crate::consts::{EDITOR_HEIGHT_PX, EDITOR_WIDTH_PX};
    use crate::input::{Button, Key, Tool, WheelDelta};
    use crate::overlay::RenderVariant;
    use crate::render::{self, RenderError, Scene};
    use crate::state::SlotState;
    use crate::transform::Point;
    use crate::viewport::RectViewport;

    /// What a save writes into the slot's hidden form fields.
    #[derive(Debug, Clone, Default)]
    pub struct SaveOutput {
        /// Slot state JSON for the shared `image{N}` key.
        pub state_json: String,
        /// Transform JSON for `image{N}-transform`.
        pub transform_json: String,
        /// PNG data URI for `image{N}-edited-data`; empty when export failed.
        pub edited_data_url: String,
        /// Host follow-ups, e.g. a failure notification.
        pub actions: Vec<Action>,
    }

    /// The browser editor: a session plus the canvas it draws on.
    pub struct Engine {
        canvas: HtmlCanvasElement,
        ctx: web_sys::CanvasRenderingContext2d,
        pub core: EditorSession,
        config: EditorConfig,
        icons: IconAtlas,
        source: Option<HtmlImageElement>,
    }

    impl Engine {
        /// Bind to a canvas element and start loading icon assets.
        ///
        /// # Errors
        ///
        /// Returns [`RenderError`] if the 2D context is unavailable.
        pub fn new(
            canvas: HtmlCanvasElement,
            config: EditorConfig,
            on_asset_load: Option<&js_sys::Function>,
        ) -> Result<Self, RenderError> {
            canvas.set_width(EDITOR_WIDTH_PX);
            canvas.set_height(EDITOR_HEIGHT_PX);
            let ctx = render::context_2d(&canvas)?;
            let icons = IconAtlas::load(&config, on_asset_load);
            Ok(Self { canvas, ctx, core: EditorSession::new(), config, icons, source: None })
        }

        /// Open a slot from its saved state and transform field, discarding
        /// the current session.
        pub fn open(&mut self, state: SlotState, transform_field: Option<&str>) {
            self.core = EditorSession::open_slot(state, transform_field);
            self.source = None;
            self.sync_viewport();
        }

        /// The slot's image was removed.
        pub fn remove_image(&mut self) -> Vec<Action> {
            self.source = None;
            self.core.remove_image()
        }

        /// Re-read the canvas element rect so pointer coordinates map onto
        /// the logical surface. Call on open and on every resize.
        pub fn sync_viewport(&mut self) {
            let rect = self.canvas.get_bounding_client_rect();
            self.core.set_viewport(RectViewport::editor(rect.left(), rect.top(), rect.width(), rect.height()));
        }

        /// The slot's photo finished loading.
        pub fn set_source_image(&mut self, img: HtmlImageElement) -> Vec<Action> {
            let (w, h) = (f64::from(img.natural_width()), f64::from(img.natural_height()));
            self.source = Some(img);
            self.core.load_image(w, h)
        }

        pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
            self.core.set_tool(tool)
        }

        pub fn on_pointer_down(&mut self, client: Point, button: Button) -> Vec<Action> {
            self.core.on_pointer_down(client, button)
        }

        pub fn on_pointer_move(&mut self, client: Point) -> Vec<Action> {
            self.core.on_pointer_move(client)
        }

        pub fn on_pointer_up(&mut self, client: Point) -> Vec<Action> {
            self.core.on_pointer_up(client)
        }

        pub fn on_wheel(&mut self, client: Point, delta: WheelDelta) -> Vec<Action> {
            self.core.on_wheel(client, delta)
        }

        pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
            self.core.on_key_down(key)
        }

        fn scene(&self) -> Scene<'_> {
            Scene {
                transform: &self.core.transform,
                store: &self.core.store,
                selected: self.core.selection(),
                source: self.source.as_ref(),
                icons: &self.icons,
                config: &self.config,
            }
        }

        /// Draw the interactive view.
        ///
        /// # Errors
        ///
        /// Returns [`RenderError`] if a canvas call fails.
        pub fn render(&self) -> Result<(), RenderError> {
            render::draw(&self.ctx, &self.scene(), RenderVariant::Screen)
        }

        /// Flatten the image and annotations into a PNG data URI.
        ///
        /// # Errors
        ///
        /// Returns [`RenderError`] if the offscreen canvas cannot be created
        /// or encoded.
        pub fn export_data_url(&self) -> Result<String, RenderError> {
            let document = web_sys::window().and_then(|w| w.document()).ok_or(RenderError::NoDocument)?;
            let offscreen = document
                .create_element("canvas")?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| RenderError::NoContext)?;
            offscreen.set_width(EDITOR_WIDTH_PX);
            offscreen.set_height(EDITOR_HEIGHT_PX);
            let ctx = render::context_2d(&offscreen)?;
            render::draw(&ctx, &self.scene(), RenderVariant::Export)?;
            Ok(offscreen.to_data_url_with_type("image/png")?)
        }

        /// Serialize state and flatten the bitmap for the form.
        ///
        /// Failures never propagate: the failing field is left empty and a
        /// [`Action::Notify`] is returned so the host can tell the user.
        #[must_use]
        pub fn save(&self) -> SaveOutput {
            let mut out = SaveOutput::default();
            let state = self.core.to_state();
            match state.to_json() {
                Ok(json) => out.state_json = json,
                Err(e) => {
                    log::error!("slot state not saved: {e}");
                    out.actions.push(Action::Notify(format!("Could not save image edits: {e}")));
                }
            }
            if let Some(t) = state.transform {
                match serde_json::to_string(&t) {
                    Ok(json) => out.transform_json = json,
                    Err(e) => log::error!("transform not saved: {e}"),
                }
            }
            match self.export_data_url() {
                Ok(url) => out.edited_data_url = url,
                Err(e) => {
                    log::error!("edited image export failed: {e}");
                    out.actions.push(Action::Notify(format!("Could not export edited image: {e}")));
                }
            }
            out
        }
    }
}
