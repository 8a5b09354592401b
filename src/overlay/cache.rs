//! Generated glyph caches
//!
//! A [`GlyphCache`] holds every image one configuration epoch needs. It is
//! always built complete and never mutated afterwards; a new configuration
//! gets a new cache.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::config::StyleConfig;
use crate::glyph::{self, GeneratedResource};

/// Highlight widths that are precomputed
pub const HIGHLIGHT_WIDTHS: RangeInclusive<usize> = 1..=10;

/// Placeholder glyphs and highlight bars for one configuration
#[derive(Debug)]
pub struct GlyphCache {
    /// Epoch this cache was built for
    epoch: u64,
    /// Character code -> glyph
    placeholders: HashMap<char, GeneratedResource>,
    /// Width in characters -> bar
    highlights: HashMap<usize, GeneratedResource>,
}

impl GlyphCache {
    /// Build every entry for `config`
    pub fn build(config: &StyleConfig, epoch: u64) -> Self {
        let placeholders = config
            .placeholder
            .characters
            .iter()
            .map(|&code| (code, glyph::build_placeholder_glyph(code, config)))
            .collect();

        let highlights = HIGHLIGHT_WIDTHS
            .map(|width| (width, glyph::build_highlight_bar(width, config)))
            .collect();

        Self {
            epoch,
            placeholders,
            highlights,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Look up a placeholder glyph
    pub fn placeholder(&self, code: char) -> Option<&GeneratedResource> {
        self.placeholders.get(&code)
    }

    /// Look up a highlight bar
    pub fn highlight(&self, width: usize) -> Option<&GeneratedResource> {
        self.highlights.get(&width)
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    pub fn highlight_count(&self) -> usize {
        self.highlights.len()
    }
}
