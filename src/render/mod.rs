//! Positioning of theme artwork and the timezone label.
//!
//! The clock is painted as two layers that are invalidated separately:
//! the backdrop (body and face) only changes with the theme or size, the
//! hands layer (hands and frame) changes every tick.

mod canvas;
mod compositor;
mod label;
mod transform;

pub use canvas::{Canvas, PaintCommand, RecordingCanvas};
pub use compositor::{Compositor, Layer, Layers, MARGIN, Scene};
pub use label::{
    DecorationLevel, FALLBACK_LABEL, LabelPlacement, label_text, label_visible, place_label,
};
pub use transform::{Point, Transform2D};
