use std::fmt;

use bitflags::bitflags;

use super::Canvas;
use crate::{
    clock::HandAngles,
    theme::{Artwork, ArtworkKind, Hand, Theme},
};

/// Gap between the surface edge and the clock artwork, in pixels.
pub const MARGIN: f64 = 5.0;

/// An independently invalidated render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Body and clock face. Changes only with theme or size.
    Backdrop,
    /// Hands and frame. Changes every tick.
    Hands,
}

impl Layer {
    /// Both layers, bottom first.
    pub const ALL: [Layer; 2] = [Layer::Backdrop, Layer::Hands];
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backdrop => f.write_str("backdrop"),
            Self::Hands => f.write_str("hands"),
        }
    }
}

bitflags! {
    /// Set of layers awaiting a repaint.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Layers: u8 {
        /// Body and clock face.
        const BACKDROP = 0b01;
        /// Hands and frame.
        const HANDS = 0b10;
    }
}

impl From<Layer> for Layers {
    fn from(layer: Layer) -> Self {
        match layer {
            Layer::Backdrop => Self::BACKDROP,
            Layer::Hands => Self::HANDS,
        }
    }
}

/// Everything a paint needs, borrowed from the widget for one pass.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Active theme.
    pub theme: &'a Theme,
    /// Target clock size in pixels, excluding the margin.
    pub size: f64,
    /// Hand rotations for the displayed time.
    pub angles: HandAngles,
    /// Whether the second hand is drawn.
    pub show_seconds: bool,
}

impl Scene<'_> {
    /// Ratio of target size to the theme's native size.
    pub fn scale(&self) -> f64 {
        self.size / self.theme.size()
    }
}

/// Paints theme artwork onto a [`Canvas`].
///
/// Every pass starts by offsetting by [`MARGIN`] and leaves the canvas
/// transform stack as it found it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor;

impl Compositor {
    /// Paints one layer.
    pub fn paint(layer: Layer, canvas: &mut dyn Canvas, scene: &Scene<'_>) {
        match layer {
            Layer::Backdrop => Self::paint_backdrop(canvas, scene),
            Layer::Hands => Self::paint_hands(canvas, scene),
        }
    }

    /// Body, then clock face, both scaled to the target size.
    pub fn paint_backdrop(canvas: &mut dyn Canvas, scene: &Scene<'_>) {
        let theme = scene.theme;

        canvas.save();
        canvas.translate(MARGIN, MARGIN);
        Self::draw_scaled(canvas, scene, ArtworkKind::Body, theme.body());
        Self::draw_scaled(canvas, scene, ArtworkKind::Clockface, theme.clockface());
        canvas.restore();
    }

    /// Hour, minute and optionally second hand, then the frame on top.
    pub fn paint_hands(canvas: &mut dyn Canvas, scene: &Scene<'_>) {
        let theme = scene.theme;
        let angles = scene.angles;

        canvas.save();
        canvas.translate(MARGIN, MARGIN);

        Self::draw_hand(canvas, scene, ArtworkKind::Hour, theme.hour(), angles.hour);
        Self::draw_hand(canvas, scene, ArtworkKind::Minute, theme.minute(), angles.minute);
        if scene.show_seconds {
            Self::draw_hand(canvas, scene, ArtworkKind::Second, theme.second(), angles.second);
        }

        Self::draw_scaled(canvas, scene, ArtworkKind::Frame, theme.frame());
        canvas.restore();
    }

    fn draw_scaled(
        canvas: &mut dyn Canvas,
        scene: &Scene<'_>,
        kind: ArtworkKind,
        artwork: &Artwork,
    ) {
        let scale = scene.scale();

        canvas.save();
        canvas.scale(scale, scale);
        canvas.draw_artwork(kind, artwork);
        canvas.restore();
    }

    fn draw_hand(
        canvas: &mut dyn Canvas,
        scene: &Scene<'_>,
        kind: ArtworkKind,
        hand: &Hand,
        angle: f64,
    ) {
        let scale = scene.scale();
        let center = scene.size / 2.0;

        canvas.save();
        canvas.translate(center, center);
        canvas.rotate(angle);
        canvas.translate(-hand.pivot.x * scale, -hand.pivot.y * scale);
        canvas.scale(scale, scale);
        canvas.draw_artwork(kind, &hand.artwork);
        canvas.restore();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::path::PathBuf;

    use super::*;
    use crate::{
        clock::{DisplayTime, HandAngles},
        render::{PaintCommand, Point, RecordingCanvas, Transform2D},
        theme::ThemeLoader,
    };

    fn theme(name: &str) -> Theme {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/themes");
        ThemeLoader::new(root).load_theme(name).unwrap()
    }

    fn scene(theme: &Theme, size: f64, show_seconds: bool) -> Scene<'_> {
        Scene {
            theme,
            size,
            angles: HandAngles::at(DisplayTime::new(10, 8, 37)),
            show_seconds,
        }
    }

    fn drawn(canvas: &RecordingCanvas) -> Vec<ArtworkKind> {
        canvas
            .commands()
            .iter()
            .map(|PaintCommand::DrawArtwork { kind, .. }| *kind)
            .collect()
    }

    fn transform_of(canvas: &RecordingCanvas, wanted: ArtworkKind) -> Transform2D {
        canvas
            .commands()
            .iter()
            .find_map(|PaintCommand::DrawArtwork { kind, transform, .. }| {
                (*kind == wanted).then_some(*transform)
            })
            .unwrap()
    }

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn backdrop_draws_body_then_face() {
        let theme = theme("default");
        let mut canvas = RecordingCanvas::new();

        Compositor::paint(Layer::Backdrop, &mut canvas, &scene(&theme, 150.0, true));

        assert_eq!(drawn(&canvas), vec![ArtworkKind::Body, ArtworkKind::Clockface]);
        let body = transform_of(&canvas, ArtworkKind::Body);
        assert_close(body.apply(Point::new(0.0, 0.0)), Point::new(MARGIN, MARGIN));
        assert_close(
            body.apply(Point::new(theme.size(), theme.size())),
            Point::new(MARGIN + 150.0, MARGIN + 150.0),
        );
    }

    #[test]
    fn every_pivot_lands_on_the_clock_center() {
        for name in ["default", "station"] {
            let theme = theme(name);
            let size = 240.0;
            let mut canvas = RecordingCanvas::new();

            Compositor::paint(Layer::Hands, &mut canvas, &scene(&theme, size, true));

            let center = Point::new(MARGIN + size / 2.0, MARGIN + size / 2.0);
            for (kind, hand) in [
                (ArtworkKind::Hour, theme.hour()),
                (ArtworkKind::Minute, theme.minute()),
                (ArtworkKind::Second, theme.second()),
            ] {
                assert_close(transform_of(&canvas, kind).apply(hand.pivot), center);
            }
        }
    }

    #[test]
    fn hands_are_scaled_like_the_backdrop() {
        let theme = theme("default");
        let mut canvas = RecordingCanvas::new();

        Compositor::paint(Layer::Hands, &mut canvas, &scene(&theme, 100.0, true));

        let scale = 100.0 / theme.size();
        assert!((transform_of(&canvas, ArtworkKind::Minute).scale_factor() - scale).abs() < 1e-9);
    }

    #[test]
    fn hidden_second_hand_is_skipped_and_frame_is_last() {
        let theme = theme("default");
        let mut canvas = RecordingCanvas::new();

        Compositor::paint(Layer::Hands, &mut canvas, &scene(&theme, 150.0, false));

        assert_eq!(
            drawn(&canvas),
            vec![ArtworkKind::Hour, ArtworkKind::Minute, ArtworkKind::Frame]
        );
    }

    #[test]
    fn frame_is_not_rotated_by_hands() {
        let theme = theme("default");
        let mut canvas = RecordingCanvas::new();

        Compositor::paint(Layer::Hands, &mut canvas, &scene(&theme, 150.0, true));

        let frame = transform_of(&canvas, ArtworkKind::Frame);
        assert_eq!(frame.b, 0.0);
        assert_eq!(frame.c, 0.0);
        assert_close(frame.apply(Point::new(0.0, 0.0)), Point::new(MARGIN, MARGIN));
    }

    #[test]
    fn passes_leave_transform_stack_balanced() {
        let theme = theme("station");
        let mut canvas = RecordingCanvas::new();

        for layer in Layer::ALL {
            Compositor::paint(layer, &mut canvas, &scene(&theme, 150.0, true));
        }

        assert_eq!(canvas.depth(), 0);
        assert_eq!(canvas.unbalanced_restores(), 0);
        assert_eq!(canvas.current_transform(), Transform2D::IDENTITY);
    }

    #[test]
    fn layer_converts_to_flag() {
        let mut dirty = Layers::empty();
        dirty |= Layer::Hands.into();
        dirty |= Layer::Hands.into();

        assert_eq!(dirty, Layers::HANDS);
        assert!(!dirty.contains(Layers::BACKDROP));
    }
}
