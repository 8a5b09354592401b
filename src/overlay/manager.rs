//! Overlay lifecycle manager
//!
//! The [`OverlayManager`] owns the active style configuration, the glyph
//! cache derived from it, and every overlay handle it has applied to a
//! viewport. Handles fall into three categories:
//!
//! - placeholder handles: one per `add_decorations` call, all cleared by `remove_decorations`
//! - highlight handles: one per `add_highlights` call, all cleared by `remove_highlights`
//! - the dim handle: at most one, replaced by each `dim_editor` call
//!
//! Apply operations before the first `refresh_config` fail with
//! [`Error::NotConfigured`] without touching the viewport. `dim_editor`
//! doesn't read the cache and works in any state. Unknown placeholder codes
//! and highlight widths outside 1..=10 are not errors: their decorations
//! carry no resource and the rest of the batch is unaffected.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::cache::GlyphCache;
use crate::config::StyleConfig;
use crate::error::{Error, Result};
use crate::glyph::GeneratedResource;
use crate::position::{PlaceholderTarget, Range};
use crate::viewport::{Decoration, OverlayStyle, Viewport};

/// Placeholder anchors sit one column past the target character
const PLACEHOLDER_ANCHOR_OFFSET: usize = 1;
/// Highlight anchors sit one column past the placeholder glyph
const HIGHLIGHT_ANCHOR_OFFSET: usize = 2;

/// Tracks glyph caches and applied overlays for one viewport session
pub struct OverlayManager<H> {
    config: Option<StyleConfig>,
    cache: Option<Arc<GlyphCache>>,
    epoch: u64,
    placeholder_handles: Vec<H>,
    highlight_handles: Vec<H>,
    dim_handle: Option<H>,
}

impl<H> OverlayManager<H> {
    /// Create an unconfigured manager
    pub fn new() -> Self {
        Self {
            config: None,
            cache: None,
            epoch: 0,
            placeholder_handles: Vec::new(),
            highlight_handles: Vec::new(),
            dim_handle: None,
        }
    }

    /// Replace the style configuration and rebuild every cached glyph.
    ///
    /// The new cache is built completely before it replaces the old one.
    pub fn refresh_config(&mut self, config: StyleConfig) {
        let epoch = self.epoch + 1;
        let cache = GlyphCache::build(&config, epoch);
        debug!(
            epoch,
            placeholders = cache.placeholder_count(),
            highlights = cache.highlight_count(),
            "rebuilt glyph cache"
        );

        self.cache = Some(Arc::new(cache));
        self.config = Some(config);
        self.epoch = epoch;
    }

    /// Number of completed `refresh_config` calls
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn config(&self) -> Option<&StyleConfig> {
        self.config.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.cache.is_some()
    }

    /// The cached glyph for a character code
    pub fn placeholder_resource(&self, code: char) -> Option<&GeneratedResource> {
        self.cache.as_ref()?.placeholder(code)
    }

    /// The cached bar for a highlight width
    pub fn highlight_resource(&self, width: usize) -> Option<&GeneratedResource> {
        self.cache.as_ref()?.highlight(width)
    }

    pub fn placeholder_handle_count(&self) -> usize {
        self.placeholder_handles.len()
    }

    pub fn highlight_handle_count(&self) -> usize {
        self.highlight_handles.len()
    }

    pub fn is_dimmed(&self) -> bool {
        self.dim_handle.is_some()
    }

    /// Snapshot of the current config and cache, or `NotConfigured`
    fn snapshot(&self, operation: &str) -> Result<(&StyleConfig, Arc<GlyphCache>)> {
        match (&self.config, &self.cache) {
            (Some(config), Some(cache)) => Ok((config, Arc::clone(cache))),
            _ => {
                warn!(operation, "overlay requested before style configuration");
                Err(Error::NotConfigured)
            }
        }
    }

    /// Show a placeholder glyph for every target as one new overlay batch
    pub fn add_decorations<V>(
        &mut self,
        viewport: &mut V,
        targets: &[PlaceholderTarget],
    ) -> Result<()>
    where
        V: Viewport<Handle = H>,
    {
        let (config, cache) = self.snapshot("add_decorations")?;
        let style = OverlayStyle::Glyph {
            width: config.placeholder.width,
            height: config.placeholder.height,
            shift_left: config.placeholder.width,
        };

        let decorations = targets
            .iter()
            .map(|target| {
                let resource = cache.placeholder(target.placeholder).cloned();
                if resource.is_none() {
                    trace!(code = %target.placeholder, "no glyph for placeholder code");
                }
                Decoration::at(
                    target.position().shifted(PLACEHOLDER_ANCHOR_OFFSET),
                    resource,
                )
            })
            .collect();

        let handle = viewport.create_overlay(style);
        viewport.bind(&handle, decorations);
        self.placeholder_handles.push(handle);

        debug!(
            targets = targets.len(),
            handles = self.placeholder_handles.len(),
            "added placeholder overlay"
        );
        Ok(())
    }

    /// Show one highlight bar `highlight_count` characters wide after every target
    pub fn add_highlights<V>(
        &mut self,
        viewport: &mut V,
        targets: &[PlaceholderTarget],
        highlight_count: usize,
    ) -> Result<()>
    where
        V: Viewport<Handle = H>,
    {
        let (config, cache) = self.snapshot("add_highlights")?;
        let width = u32::try_from(highlight_count)
            .unwrap_or(u32::MAX)
            .saturating_mul(config.highlight.width);
        let style = OverlayStyle::Glyph {
            width,
            height: config.highlight.height,
            shift_left: width,
        };

        let resource = cache.highlight(highlight_count).cloned();
        if resource.is_none() {
            trace!(highlight_count, "no highlight bar for width");
        }

        let decorations = targets
            .iter()
            .map(|target| {
                Decoration::at(
                    target.position().shifted(HIGHLIGHT_ANCHOR_OFFSET),
                    resource.clone(),
                )
            })
            .collect();

        let handle = viewport.create_overlay(style);
        viewport.bind(&handle, decorations);
        self.highlight_handles.push(handle);

        debug!(
            targets = targets.len(),
            highlight_count,
            handles = self.highlight_handles.len(),
            "added highlight overlay"
        );
        Ok(())
    }

    /// Desaturate `ranges`, or the whole buffer when none are given.
    ///
    /// Any previous dim overlay is removed first.
    pub fn dim_editor<V>(&mut self, viewport: &mut V, ranges: Option<&[Range]>)
    where
        V: Viewport<Handle = H>,
    {
        self.undim_editor(viewport);

        let decorations: Vec<Decoration> = match ranges {
            Some(ranges) if !ranges.is_empty() => {
                ranges.iter().copied().map(Decoration::range).collect()
            }
            _ => vec![Decoration::range(Range::whole_buffer(viewport.line_count()))],
        };

        debug!(ranges = decorations.len(), "dimming editor");
        let handle = viewport.create_overlay(OverlayStyle::Dim);
        viewport.bind(&handle, decorations);
        self.dim_handle = Some(handle);
    }

    /// Clear and release every placeholder overlay
    pub fn remove_decorations<V>(&mut self, viewport: &mut V)
    where
        V: Viewport<Handle = H>,
    {
        let released = release_all(viewport, &mut self.placeholder_handles);
        if released > 0 {
            debug!(released, "removed placeholder overlays");
        }
    }

    /// Clear and release every highlight overlay
    pub fn remove_highlights<V>(&mut self, viewport: &mut V)
    where
        V: Viewport<Handle = H>,
    {
        let released = release_all(viewport, &mut self.highlight_handles);
        if released > 0 {
            debug!(released, "removed highlight overlays");
        }
    }

    /// Clear and release the dim overlay, if any
    pub fn undim_editor<V>(&mut self, viewport: &mut V)
    where
        V: Viewport<Handle = H>,
    {
        if let Some(handle) = self.dim_handle.take() {
            viewport.clear(&handle);
            viewport.release(handle);
            debug!("removed dim overlay");
        }
    }
}

impl<H> Default for OverlayManager<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clear and release every handle in `handles`, leaving it empty
fn release_all<V: Viewport>(viewport: &mut V, handles: &mut Vec<V::Handle>) -> usize {
    let count = handles.len();
    for handle in handles.drain(..) {
        viewport.clear(&handle);
        viewport.release(handle);
    }
    count
}
