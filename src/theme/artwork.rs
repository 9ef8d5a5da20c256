use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use super::ThemeError;

/// The six pieces of artwork making up a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkKind {
    /// Case behind everything else.
    Body,
    /// Dial with the hour marks.
    Clockface,
    /// Glass or bezel drawn above the hands.
    Frame,
    /// Hour hand.
    Hour,
    /// Minute hand.
    Minute,
    /// Second hand.
    Second,
}

impl fmt::Display for ArtworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Body => "body",
            Self::Clockface => "clockface",
            Self::Frame => "frame",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        };
        f.write_str(name)
    }
}

/// A parsed vector image, handed to the rasterizer as-is.
///
/// Cloning shares the parsed tree and the source document.
#[derive(Clone)]
pub struct Artwork {
    path: PathBuf,
    document: Arc<[u8]>,
    tree: Arc<usvg::Tree>,
}

impl Artwork {
    /// Loads and parses an SVG document from disk.
    ///
    /// # Errors
    /// Returns `ThemeError::ArtworkLoad` if the file is unreadable, empty or
    /// does not parse as SVG.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let load_error = |details: String| ThemeError::ArtworkLoad {
            path: path.to_path_buf(),
            details,
        };

        let document = fs::read(path).map_err(|e| load_error(e.to_string()))?;

        if document.is_empty() {
            return Err(load_error("file is empty".to_string()));
        }

        let tree = usvg::Tree::from_data(&document, &usvg::Options::default())
            .map_err(|e| load_error(e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            document: document.into(),
            tree: Arc::new(tree),
        })
    }

    /// File the artwork was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw SVG document.
    pub fn document(&self) -> &[u8] {
        &self.document
    }

    /// Parsed render tree.
    pub fn tree(&self) -> &usvg::Tree {
        &self.tree
    }

    /// Intrinsic width and height of the image.
    pub fn size(&self) -> (f64, f64) {
        let size = self.tree.size();
        (f64::from(size.width()), f64::from(size.height()))
    }
}

impl PartialEq for Artwork {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.document == other.document
    }
}

impl fmt::Debug for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artwork")
            .field("path", &self.path)
            .field("bytes", &self.document.len())
            .field("size", &self.size())
            .finish()
    }
}
