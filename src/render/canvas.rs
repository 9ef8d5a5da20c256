use std::path::PathBuf;

use tracing::warn;

use super::Transform2D;
use crate::theme::{Artwork, ArtworkKind};

/// Drawing target with a save/restore transform stack.
///
/// Rasterizing the artwork is up to the implementation; the compositor only
/// positions it.
pub trait Canvas {
    /// Pushes the current transform.
    fn save(&mut self);

    /// Pops back to the last saved transform.
    fn restore(&mut self);

    /// Appends a translation to the current transform.
    fn translate(&mut self, x: f64, y: f64);

    /// Appends a scale to the current transform.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Appends a clockwise rotation in radians to the current transform.
    fn rotate(&mut self, radians: f64);

    /// Draws `artwork` with its origin at the current transform.
    fn draw_artwork(&mut self, kind: ArtworkKind, artwork: &Artwork);
}

/// A command recorded by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Artwork drawn under a fully resolved transform.
    DrawArtwork {
        /// Which piece of the theme was drawn.
        kind: ArtworkKind,
        /// Source file of the artwork.
        path: PathBuf,
        /// Artwork space to surface space.
        transform: Transform2D,
    },
}

/// Canvas that records draw calls instead of rasterizing them.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    current: Transform2D,
    stack: Vec<Transform2D>,
    commands: Vec<PaintCommand>,
    unbalanced_restores: usize,
}

impl RecordingCanvas {
    /// Creates an empty canvas at the identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands.
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the canvas empty.
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The transform draw calls are currently placed under.
    pub fn current_transform(&self) -> Transform2D {
        self.current
    }

    /// Number of saves not yet restored.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Restores issued with nothing saved.
    pub fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }

    fn append(&mut self, transform: Transform2D) {
        self.current = self.current * transform;
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(saved) => self.current = saved,
            None => {
                warn!("restore without matching save");
                self.unbalanced_restores += 1;
            }
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.append(Transform2D::translation(x, y));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.append(Transform2D::scale(sx, sy));
    }

    fn rotate(&mut self, radians: f64) {
        self.append(Transform2D::rotation(radians));
    }

    fn draw_artwork(&mut self, kind: ArtworkKind, artwork: &Artwork) {
        self.commands.push(PaintCommand::DrawArtwork {
            kind,
            path: artwork.path().to_path_buf(),
            transform: self.current,
        });
    }
}
