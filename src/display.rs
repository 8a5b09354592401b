//! Terminal viewport
//!
//! [`TerminalViewport`] keeps the overlay batches bound to it and draws them
//! over the buffer text. A terminal can't show SVG images, so each resource
//! is drawn from its glyph metadata instead: a placeholder paints its label
//! over the column left of its anchor, a highlight bar paints the `width`
//! columns left of its anchor in reverse video, and dim ranges draw faint.

use std::collections::BTreeMap;

use crossterm::style::Attribute;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::glyph::Glyph;
use crate::position::Position;
use crate::terminal::Terminal;
use crate::viewport::{Decoration, OverlayStyle, Viewport};

/// Glyphs are not painted at or past this column (widest u16 terminal)
const MAX_PAINT_COLUMNS: usize = u16::MAX as usize;

/// Handle to an overlay batch on a [`TerminalViewport`]
#[derive(Debug, PartialEq, Eq)]
pub struct OverlayId(u64);

/// How a single cell is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Normal,
    Dim,
    /// Placeholder label
    Label,
    /// Highlight bar
    Bar,
}

/// One character cell of a composed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

struct Overlay {
    style: OverlayStyle,
    decorations: Vec<Decoration>,
}

/// A buffer view that renders overlays to a terminal
pub struct TerminalViewport {
    buffer: Buffer,
    /// First visible line
    top_line: usize,
    /// Live overlays, in creation order
    overlays: BTreeMap<u64, Overlay>,
    next_id: u64,
    /// Message shown on the bottom row
    message: Option<String>,
}

impl TerminalViewport {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            top_line: 0,
            overlays: BTreeMap::new(),
            next_id: 0,
            message: None,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Scroll so `line` is the first visible line
    pub fn scroll_to(&mut self, line: usize) {
        self.top_line = line.min(self.buffer.line_count().saturating_sub(1));
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Number of overlays created and not yet released
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Build the styled cells for one buffer line
    pub fn compose_line(&self, line_idx: usize) -> Vec<Cell> {
        let text = self.buffer.line(line_idx).unwrap_or("");
        let mut cells: Vec<Cell> = text
            .chars()
            .map(|ch| Cell {
                ch,
                style: CellStyle::Normal,
            })
            .collect();

        for overlay in self.overlays.values() {
            match overlay.style {
                OverlayStyle::Dim => dim_cells(&mut cells, line_idx, &overlay.decorations),
                OverlayStyle::Glyph { .. } => {
                    for decoration in &overlay.decorations {
                        if decoration.anchor().line == line_idx {
                            paint_glyph(&mut cells, decoration);
                        }
                    }
                }
            }
        }

        cells
    }

    /// Render the visible lines and the message row
    pub fn render(&self, terminal: &mut Terminal) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();
        let text_rows = rows.saturating_sub(1);

        terminal.clear_screen()?;
        for row in 0..text_rows {
            let line_idx = self.top_line + row as usize;
            terminal.move_cursor(row, 0)?;

            if line_idx < self.buffer.line_count() {
                let cells = self.compose_line(line_idx);
                write_cells(terminal, &cells, cols)?;
            } else {
                terminal.set_attribute(Attribute::Dim)?;
                terminal.write_str("~")?;
                terminal.set_attribute(Attribute::Reset)?;
            }
            terminal.clear_to_eol()?;
        }

        terminal.move_cursor(text_rows, 0)?;
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| self.buffer.name().to_string());
        terminal.write_str(&truncate_to_width(&message, cols))?;
        terminal.clear_to_eol()?;

        terminal.flush()
    }
}

impl Viewport for TerminalViewport {
    type Handle = OverlayId;

    fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    fn create_overlay(&mut self, style: OverlayStyle) -> OverlayId {
        let id = self.next_id;
        self.next_id += 1;
        self.overlays.insert(
            id,
            Overlay {
                style,
                decorations: Vec::new(),
            },
        );
        OverlayId(id)
    }

    fn bind(&mut self, handle: &OverlayId, decorations: Vec<Decoration>) {
        if let Some(overlay) = self.overlays.get_mut(&handle.0) {
            overlay.decorations = decorations;
        }
    }

    fn clear(&mut self, handle: &OverlayId) {
        if let Some(overlay) = self.overlays.get_mut(&handle.0) {
            overlay.decorations.clear();
        }
    }

    fn release(&mut self, handle: OverlayId) {
        self.overlays.remove(&handle.0);
    }
}

/// Mark every cell of `line_idx` inside a dim range
fn dim_cells(cells: &mut [Cell], line_idx: usize, decorations: &[Decoration]) {
    for (col, cell) in cells.iter_mut().enumerate() {
        let pos = Position::new(line_idx, col);
        if decorations.iter().any(|d| d.range.contains(pos)) {
            cell.style = CellStyle::Dim;
        }
    }
}

/// Draw one image decoration into its line
fn paint_glyph(cells: &mut Vec<Cell>, decoration: &Decoration) {
    let Some(resource) = &decoration.resource else {
        return;
    };
    let anchor = decoration.anchor().character;

    match resource.glyph() {
        Glyph::Placeholder { label, .. } => {
            let Some(col) = anchor.checked_sub(1) else {
                return;
            };
            let ch = label.chars().next().unwrap_or(' ');
            set_cell(cells, col, Some(ch), CellStyle::Label);
        }
        Glyph::Highlight { width } => {
            for col in anchor.saturating_sub(*width)..anchor {
                set_cell(cells, col, None, CellStyle::Bar);
            }
        }
    }
}

/// Style a cell, padding the line with spaces if it is too short.
/// Columns no terminal can show are skipped.
fn set_cell(cells: &mut Vec<Cell>, col: usize, ch: Option<char>, style: CellStyle) {
    if col >= MAX_PAINT_COLUMNS {
        return;
    }
    if cells.len() <= col {
        cells.resize(
            col + 1,
            Cell {
                ch: ' ',
                style: CellStyle::Normal,
            },
        );
    }
    let cell = &mut cells[col];
    if let Some(ch) = ch {
        cell.ch = ch;
    }
    cell.style = style;
}

/// Write cells, switching attributes only between runs of equal style
fn write_cells(terminal: &mut Terminal, cells: &[Cell], max_cols: usize) -> Result<()> {
    let mut width = 0;
    let mut current = CellStyle::Normal;
    let mut run = String::new();

    for cell in cells {
        let ch_width = unicode_width::UnicodeWidthChar::width(cell.ch).unwrap_or(1);
        if width + ch_width > max_cols {
            break;
        }
        width += ch_width;

        if cell.style != current {
            terminal.write_str(&run)?;
            run.clear();
            apply_style(terminal, cell.style)?;
            current = cell.style;
        }
        run.push(cell.ch);
    }

    terminal.write_str(&run)?;
    terminal.set_attribute(Attribute::Reset)
}

fn apply_style(terminal: &mut Terminal, style: CellStyle) -> Result<()> {
    terminal.set_attribute(Attribute::Reset)?;
    match style {
        CellStyle::Normal => Ok(()),
        CellStyle::Dim => terminal.set_attribute(Attribute::Dim),
        CellStyle::Label => {
            terminal.set_attribute(Attribute::Bold)?;
            terminal.set_attribute(Attribute::Reverse)
        }
        CellStyle::Bar => terminal.set_attribute(Attribute::Reverse),
    }
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleConfig;
    use crate::overlay::OverlayManager;
    use crate::position::{PlaceholderTarget, Range};

    fn viewport(text: &str) -> TerminalViewport {
        TerminalViewport::new(Buffer::from_text("test", text))
    }

    fn configured() -> OverlayManager<OverlayId> {
        let mut manager = OverlayManager::new();
        manager.refresh_config(StyleConfig::default());
        manager
    }

    fn styles(cells: &[Cell]) -> Vec<CellStyle> {
        cells.iter().map(|c| c.style).collect()
    }

    fn text(cells: &[Cell]) -> String {
        cells.iter().map(|c| c.ch).collect()
    }

    #[test]
    fn test_plain_line() {
        let vp = viewport("hello");
        let cells = vp.compose_line(0);
        assert_eq!(text(&cells), "hello");
        assert!(styles(&cells).iter().all(|s| *s == CellStyle::Normal));
    }

    #[test]
    fn test_placeholder_covers_target_character() {
        let mut vp = viewport("let x = 1;");
        let mut manager = configured();
        manager
            .add_decorations(&mut vp, &[PlaceholderTarget::new(0, 4, 'q')])
            .unwrap();

        let cells = vp.compose_line(0);
        assert_eq!(text(&cells), "let q = 1;");
        assert_eq!(cells[4].style, CellStyle::Label);
        assert_eq!(cells[3].style, CellStyle::Normal);
    }

    #[test]
    fn test_upper_case_label() {
        let mut vp = viewport("abc");
        let mut manager = OverlayManager::new();
        let mut config = StyleConfig::default();
        config.placeholder.upper_case = true;
        manager.refresh_config(config);
        manager
            .add_decorations(&mut vp, &[PlaceholderTarget::new(0, 0, 'j')])
            .unwrap();

        assert_eq!(text(&vp.compose_line(0)), "Jbc");
    }

    #[test]
    fn test_unresolved_decoration_draws_nothing() {
        let mut vp = viewport("abc");
        let mut manager = OverlayManager::new();
        let mut config = StyleConfig::default();
        config.placeholder.characters = vec!['a'];
        manager.refresh_config(config);
        manager
            .add_decorations(&mut vp, &[PlaceholderTarget::new(0, 1, 'z')])
            .unwrap();

        assert_eq!(text(&vp.compose_line(0)), "abc");
        assert_eq!(vp.overlay_count(), 1);
    }

    #[test]
    fn test_highlight_bar_follows_placeholder() {
        let mut vp = viewport("abcdef");
        let mut manager = configured();
        let targets = [PlaceholderTarget::new(0, 1, 'x')];
        manager.add_decorations(&mut vp, &targets).unwrap();
        manager.add_highlights(&mut vp, &targets, 1).unwrap();

        let cells = vp.compose_line(0);
        assert_eq!(text(&cells), "axcdef");
        assert_eq!(
            styles(&cells),
            vec![
                CellStyle::Normal,
                CellStyle::Label,
                CellStyle::Bar,
                CellStyle::Normal,
                CellStyle::Normal,
                CellStyle::Normal,
            ]
        );
    }

    #[test]
    fn test_glyph_past_line_end_pads() {
        let mut vp = viewport("ab");
        let mut manager = configured();
        manager
            .add_decorations(&mut vp, &[PlaceholderTarget::new(0, 4, 'k')])
            .unwrap();

        assert_eq!(text(&vp.compose_line(0)), "ab  k");
    }

    #[test]
    fn test_glyph_at_huge_column_is_skipped() {
        let mut vp = viewport("abc");
        let mut manager = configured();
        let targets = [
            PlaceholderTarget::new(0, usize::MAX - 1, 'a'),
            PlaceholderTarget::new(0, 1 << 32, 'b'),
            PlaceholderTarget::new(0, usize::MAX, 'c'),
        ];
        manager.add_decorations(&mut vp, &targets).unwrap();
        manager.add_highlights(&mut vp, &targets, 10).unwrap();

        let cells = vp.compose_line(0);
        assert_eq!(text(&cells), "abc");
        assert!(styles(&cells).iter().all(|s| *s == CellStyle::Normal));
    }

    #[test]
    fn test_glyph_at_last_paintable_column() {
        let mut vp = viewport("");
        let mut manager = configured();
        let col = MAX_PAINT_COLUMNS - 1;
        manager
            .add_decorations(&mut vp, &[PlaceholderTarget::new(0, col, 'z')])
            .unwrap();

        let cells = vp.compose_line(0);
        assert_eq!(cells.len(), MAX_PAINT_COLUMNS);
        assert_eq!(cells[col].ch, 'z');
        assert_eq!(cells[col].style, CellStyle::Label);
    }

    #[test]
    fn test_dim_whole_buffer() {
        let mut vp = viewport("ab\ncd");
        let mut manager = configured();
        manager.dim_editor(&mut vp, None);

        for line in 0..2 {
            assert!(styles(&vp.compose_line(line))
                .iter()
                .all(|s| *s == CellStyle::Dim));
        }
    }

    #[test]
    fn test_dim_partial_range_and_labels_on_top() {
        let mut vp = viewport("abcd");
        let mut manager = configured();
        let range = Range::new(Position::new(0, 0), Position::new(0, 2));
        manager.dim_editor(&mut vp, Some(&[range][..]));
        manager
            .add_decorations(&mut vp, &[PlaceholderTarget::new(0, 0, 'f')])
            .unwrap();

        assert_eq!(
            styles(&vp.compose_line(0)),
            vec![
                CellStyle::Label,
                CellStyle::Dim,
                CellStyle::Normal,
                CellStyle::Normal
            ]
        );
    }

    #[test]
    fn test_release_frees_overlays() {
        let mut vp = viewport("abcd");
        let mut manager = configured();
        let targets = [PlaceholderTarget::new(0, 0, 'a')];
        manager.add_decorations(&mut vp, &targets).unwrap();
        manager.add_decorations(&mut vp, &targets).unwrap();
        manager.add_highlights(&mut vp, &targets, 1).unwrap();
        manager.dim_editor(&mut vp, None);
        assert_eq!(vp.overlay_count(), 4);

        manager.remove_decorations(&mut vp);
        manager.remove_highlights(&mut vp);
        manager.undim_editor(&mut vp);
        assert_eq!(vp.overlay_count(), 0);
        assert_eq!(text(&vp.compose_line(0)), "abcd");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("日本語", 4), "日本");
    }
}
