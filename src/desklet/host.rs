use std::sync::Arc;

use crate::{
    core::Result,
    render::{Canvas, DecorationLevel, LabelPlacement, Layer},
    signals::{Handler, SignalSource},
};

/// Name of the signal a [`DrawingSurface`] emits when it wants a layer painted.
pub const REPAINT_SIGNAL: &str = "repaint";

/// A drawable area owned by the host.
///
/// Repaints are requested with [`queue_repaint`](Self::queue_repaint); the
/// host answers at its own pace by emitting [`REPAINT_SIGNAL`] with the layer
/// as payload, and the widget then draws through [`paint`](Self::paint).
pub trait DrawingSurface: SignalSource<Layer> {
    /// Sets the surface size in pixels.
    fn resize(&self, width: f64, height: f64);

    /// Current surface size in pixels.
    fn size(&self) -> (f64, f64);

    /// Asks the host to repaint `layer` soon.
    fn queue_repaint(&self, layer: Layer);

    /// Hands `draw` a canvas for `layer`.
    fn paint(&self, layer: Layer, draw: &mut dyn FnMut(&mut dyn Canvas));
}

/// Capabilities the desktop shell offers to a desklet.
pub trait DeskletHost: Send + Sync {
    /// Creates the drawing surface the clock renders into.
    ///
    /// # Errors
    /// Returns `DeskletError::Host` if the host cannot provide a surface.
    fn create_surface(&self, width: f64, height: f64) -> Result<Arc<dyn DrawingSurface>>;

    /// Adds an entry to the desklet's context menu.
    fn add_menu_action(&self, label: &str, action: Handler<()>);

    /// Sets the header text shown in the decorations.
    fn set_header(&self, text: &str);

    /// Shows or hides the host decorations.
    fn set_decorations_hidden(&self, hidden: bool);

    /// Decoration level configured in the shell.
    fn decoration_level(&self) -> DecorationLevel;

    /// Rendered width and height of `text` in `style`.
    fn measure_label(&self, text: &str, style: Option<&str>) -> (f64, f64);

    /// Shows the timezone label at the given placement, or hides it.
    fn show_label(&self, placement: Option<&LabelPlacement>);
}
