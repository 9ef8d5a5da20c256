use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, trace};

use super::{DeskletHost, DrawingSurface, REPAINT_SIGNAL};
use crate::{
    core::Result,
    render::{Canvas, DecorationLevel, LabelPlacement, Layer, PaintCommand, RecordingCanvas},
    signals::{Emitter, Handler, HandlerId, SignalSource},
};

const GLYPH_WIDTH: f64 = 7.0;
const LINE_HEIGHT: f64 = 14.0;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Host without a display that records what the desklet asks of it.
///
/// Used by `analog-clock run` for diagnostics and by tests.
pub struct HeadlessHost {
    decoration_level: DecorationLevel,
    state: Mutex<HostState>,
}

#[derive(Default)]
struct HostState {
    header: Option<String>,
    decorations_hidden: Option<bool>,
    menu: Vec<(String, Handler<()>)>,
    label: Option<LabelPlacement>,
    surfaces: Vec<Arc<HeadlessSurface>>,
}

impl HeadlessHost {
    /// Creates a host reporting the given decoration level.
    pub fn new(decoration_level: DecorationLevel) -> Self {
        Self {
            decoration_level,
            state: Mutex::new(HostState::default()),
        }
    }

    /// Header text set by the desklet.
    pub fn header(&self) -> Option<String> {
        lock(&self.state).header.clone()
    }

    /// Last decoration visibility requested.
    pub fn decorations_hidden(&self) -> Option<bool> {
        lock(&self.state).decorations_hidden
    }

    /// Labels of the registered menu actions.
    pub fn menu_labels(&self) -> Vec<String> {
        lock(&self.state)
            .menu
            .iter()
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Runs the menu action named `label`. Returns `false` if there is none.
    pub fn activate_menu(&self, label: &str) -> bool {
        let action = lock(&self.state)
            .menu
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, action)| action.clone());

        match action {
            Some(action) => {
                action.call(&());
                true
            }
            None => false,
        }
    }

    /// Currently shown timezone label.
    pub fn label(&self) -> Option<LabelPlacement> {
        lock(&self.state).label.clone()
    }

    /// The most recently created surface.
    pub fn surface(&self) -> Option<Arc<HeadlessSurface>> {
        lock(&self.state).surfaces.last().cloned()
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(DecorationLevel::Full)
    }
}

impl DeskletHost for HeadlessHost {
    fn create_surface(&self, width: f64, height: f64) -> Result<Arc<dyn DrawingSurface>> {
        let surface = Arc::new(HeadlessSurface::new(width, height));
        lock(&self.state).surfaces.push(Arc::clone(&surface));
        debug!(width, height, "surface created");
        Ok(surface)
    }

    fn add_menu_action(&self, label: &str, action: Handler<()>) {
        lock(&self.state).menu.push((label.to_string(), action));
    }

    fn set_header(&self, text: &str) {
        lock(&self.state).header = Some(text.to_string());
    }

    fn set_decorations_hidden(&self, hidden: bool) {
        lock(&self.state).decorations_hidden = Some(hidden);
    }

    fn decoration_level(&self) -> DecorationLevel {
        self.decoration_level
    }

    fn measure_label(&self, text: &str, _style: Option<&str>) -> (f64, f64) {
        (text.chars().count() as f64 * GLYPH_WIDTH, LINE_HEIGHT)
    }

    fn show_label(&self, placement: Option<&LabelPlacement>) {
        lock(&self.state).label = placement.cloned();
    }
}

/// Surface that answers repaint requests at once and keeps the last frame
/// of each layer.
pub struct HeadlessSurface {
    size: Mutex<(f64, f64)>,
    signals: Emitter<Layer>,
    frames: Mutex<HashMap<Layer, Vec<PaintCommand>>>,
    paints: Mutex<HashMap<Layer, usize>>,
    requests: Mutex<HashMap<Layer, usize>>,
}

impl HeadlessSurface {
    fn new(width: f64, height: f64) -> Self {
        Self {
            size: Mutex::new((width, height)),
            signals: Emitter::new(),
            frames: Mutex::new(HashMap::new()),
            paints: Mutex::new(HashMap::new()),
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Commands of the last paint of `layer`.
    pub fn frame(&self, layer: Layer) -> Vec<PaintCommand> {
        lock(&self.frames).get(&layer).cloned().unwrap_or_default()
    }

    /// How often `layer` was painted.
    pub fn paint_count(&self, layer: Layer) -> usize {
        lock(&self.paints).get(&layer).copied().unwrap_or(0)
    }

    /// How often a repaint of `layer` was requested.
    pub fn repaint_requests(&self, layer: Layer) -> usize {
        lock(&self.requests).get(&layer).copied().unwrap_or(0)
    }

    /// Number of handlers connected to the repaint signal.
    pub fn repaint_handlers(&self) -> usize {
        self.signals.handler_count(REPAINT_SIGNAL)
    }
}

impl SignalSource<Layer> for HeadlessSurface {
    fn connect(&self, signal: &str, handler: Handler<Layer>) -> HandlerId {
        self.signals.connect(signal, handler)
    }

    fn disconnect(&self, id: HandlerId) -> bool {
        self.signals.disconnect(id)
    }
}

impl DrawingSurface for HeadlessSurface {
    fn resize(&self, width: f64, height: f64) {
        *lock(&self.size) = (width, height);
        debug!(width, height, "surface resized");
    }

    fn size(&self) -> (f64, f64) {
        *lock(&self.size)
    }

    fn queue_repaint(&self, layer: Layer) {
        *lock(&self.requests).entry(layer).or_default() += 1;
        self.signals.emit(REPAINT_SIGNAL, &layer);
    }

    fn paint(&self, layer: Layer, draw: &mut dyn FnMut(&mut dyn Canvas)) {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas);

        let commands = canvas.take_commands();
        trace!(%layer, commands = commands.len(), "layer painted");

        lock(&self.frames).insert(layer, commands);
        *lock(&self.paints).entry(layer).or_default() += 1;
    }
}
