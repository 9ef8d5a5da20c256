//! Analog clock desklet.
//!
//! A themeable analog clock for desktop shells. The crate holds everything
//! except the shell itself and the SVG rasterizer:
//!
//! - Per-instance JSON settings with live file watching and schema upgrades
//! - Theme loading (descriptor plus six pieces of artwork)
//! - A tick scheduler aligned to wall-clock seconds or minutes
//! - A two-layer compositor positioning rotated hand artwork
//! - A command-line settings editor
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use analog_clock::{
//!     desklet::{self, AnalogClock, HeadlessHost, event_channel},
//!     paths::DeskletPaths,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let paths = DeskletPaths::from_env()?;
//! let (events, receiver) = event_channel();
//! let clock = AnalogClock::new(Arc::new(HeadlessHost::default()), &paths, "desklet-0", events)?;
//!
//! desklet::run(clock, receiver).await?;
//! # Ok(())
//! # }
//! ```

/// Command-line interface for settings and themes.
pub mod cli;

/// Wall-clock time, hand angles and tick scheduling.
pub mod clock;

/// Core error types and result aliases.
pub mod core;

/// The desklet widget, its host interface and event loop.
pub mod desklet;

/// File system locations.
pub mod paths;

/// Layered compositing of theme artwork.
pub mod render;

/// Per-instance settings store.
pub mod settings;

/// Named signals and subscription tracking.
pub mod signals;

/// Theme loading.
pub mod theme;

/// Logging setup.
pub mod tracing_config;
