//! Glyph caching and overlay lifecycle

mod cache;
mod manager;

pub use cache::{GlyphCache, HIGHLIGHT_WIDTHS};
pub use manager::OverlayManager;
