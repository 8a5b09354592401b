//! Rendering backend seam
//!
//! The overlay manager never draws anything itself. It asks a [`Viewport`]
//! for overlay handles, binds decorations to them, and later clears and
//! releases them. Handles are host resources: every handle obtained from
//! [`Viewport::create_overlay`] must eventually go back through
//! [`Viewport::release`].

use crate::glyph::GeneratedResource;
use crate::position::{Position, Range};

/// How every decoration in one overlay batch is drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayStyle {
    /// Image decorations of a fixed footprint. The footprint is shifted
    /// left by `shift_left` so it covers text instead of pushing it.
    Glyph {
        width: u32,
        height: u32,
        shift_left: u32,
    },
    /// No text decoration, full desaturation
    Dim,
}

/// One entry of an overlay batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub range: Range,
    /// Image to show; `None` when the lookup missed
    pub resource: Option<GeneratedResource>,
}

impl Decoration {
    /// Image anchored at a zero-width insertion point
    pub fn at(anchor: Position, resource: Option<GeneratedResource>) -> Self {
        Self {
            range: Range::point(anchor),
            resource,
        }
    }

    /// Plain styled range without an image
    pub fn range(range: Range) -> Self {
        Self {
            range,
            resource: None,
        }
    }

    pub fn anchor(&self) -> Position {
        self.range.start
    }
}

/// A surface that can display overlay batches over a text buffer
pub trait Viewport {
    /// Host-side token for one overlay batch
    type Handle;

    /// Number of lines in the displayed buffer
    fn line_count(&self) -> usize;

    /// Allocate a new, empty overlay batch
    fn create_overlay(&mut self, style: OverlayStyle) -> Self::Handle;

    /// Replace the decorations shown by `handle`
    fn bind(&mut self, handle: &Self::Handle, decorations: Vec<Decoration>);

    /// Remove every decoration shown by `handle`
    fn clear(&mut self, handle: &Self::Handle);

    /// Free the host resources behind `handle`
    fn release(&mut self, handle: Self::Handle);
}
