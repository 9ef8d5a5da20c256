//! Clock themes: a descriptor plus six pieces of vector artwork.
//!
//! A theme lives in its own directory below the themes root:
//!
//! ```text
//! themes/
//!   default/
//!     metadata.json
//!     body.svg  clockface.svg  frame.svg  hour.svg  minute.svg  second.svg
//! ```

mod artwork;
mod error;
mod loader;
mod metadata;


pub use artwork::{Artwork, ArtworkKind};
pub use error::ThemeError;
pub use loader::{Hand, Theme, ThemeLoader};
pub use metadata::{HandMetadata, METADATA_FILE, ThemeMetadata};
