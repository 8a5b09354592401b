//! jumpmark - jump-target markers for text buffers
//!
//! Generates small SVG glyphs for jump labels and highlight bars, caches
//! them per style configuration, and manages the overlay handles that show
//! them on a [`Viewport`].
//!
//! ```no_run
//! use jumpmark::{Buffer, OverlayManager, PlaceholderTarget, StyleConfig, TerminalViewport};
//!
//! let mut viewport = TerminalViewport::new(Buffer::from_text("demo", "let x = 1;"));
//! let mut manager = OverlayManager::new();
//! manager.refresh_config(StyleConfig::default());
//! manager.dim_editor(&mut viewport, None);
//! manager
//!     .add_decorations(&mut viewport, &[PlaceholderTarget::new(0, 4, 'a')])
//!     .unwrap();
//! ```

pub mod buffer;
pub mod config;
pub mod display;
pub mod error;
pub mod glyph;
pub mod logging;
pub mod overlay;
pub mod position;
pub mod targets;
pub mod terminal;
pub mod viewport;

pub use buffer::Buffer;
pub use config::{HighlightStyle, PlaceholderStyle, StyleConfig};
pub use display::TerminalViewport;
pub use error::{Error, Result};
pub use glyph::{build_highlight_bar, build_placeholder_glyph, GeneratedResource, Glyph};
pub use overlay::OverlayManager;
pub use position::{PlaceholderTarget, Position, Range};
pub use viewport::{Decoration, OverlayStyle, Viewport};
