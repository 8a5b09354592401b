//! Glyph builder
//!
//! Turns a character code or a highlight width, plus the active
//! [`StyleConfig`], into a self-contained SVG image addressed by an inline
//! `data:` URI. Construction is pure: the same inputs always produce the
//! same resource.

pub mod svg;

use std::fmt;
use std::sync::Arc;

use crate::config::StyleConfig;
use svg::Element;

/// Prefix of every generated resource identifier
pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;utf8,";

/// Corner radius of glyph and highlight backgrounds
const CORNER_RADIUS: u32 = 2;

/// What a generated resource depicts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Single jump label. `label` is `code` after case conversion.
    Placeholder { code: char, label: String },
    /// Background bar spanning `width` characters
    Highlight { width: usize },
}

#[derive(Debug, PartialEq, Eq)]
struct ResourceInner {
    glyph: Glyph,
    uri: String,
}

/// An immutable generated image.
///
/// Clones share the same allocation, so one resource can be bound to any
/// number of positions cheaply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedResource(Arc<ResourceInner>);

impl GeneratedResource {
    fn new(glyph: Glyph, markup: &str) -> Self {
        Self(Arc::new(ResourceInner {
            glyph,
            uri: to_data_uri(markup),
        }))
    }

    pub fn glyph(&self) -> &Glyph {
        &self.0.glyph
    }

    /// The full `data:` URI
    pub fn uri(&self) -> &str {
        &self.0.uri
    }

    /// The embedded markup, with URI escapes decoded
    pub fn markup(&self) -> String {
        let encoded = &self.0.uri[DATA_URI_PREFIX.len()..];
        encoded.replace("%23", "#").replace("%25", "%")
    }

    /// Check whether two handles point at the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for GeneratedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

/// Wrap markup in a data URI. `%` and `#` are escaped so the URI
/// parses as a single opaque path (colors like `#ff0` are common).
fn to_data_uri(markup: &str) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + markup.len());
    uri.push_str(DATA_URI_PREFIX);
    for ch in markup.chars() {
        match ch {
            '%' => uri.push_str("%25"),
            '#' => uri.push_str("%23"),
            _ => uri.push(ch),
        }
    }
    uri
}

/// Apply the configured case to a character code
pub fn placeholder_label(code: char, config: &StyleConfig) -> String {
    if config.placeholder.upper_case {
        code.to_uppercase().collect()
    } else {
        code.to_lowercase().collect()
    }
}

/// Build the SVG tree for a placeholder glyph
pub fn placeholder_element(code: char, config: &StyleConfig) -> Element {
    let style = &config.placeholder;
    Element::svg(style.width, style.height)
        .child(Element::rounded_rect(
            style.width,
            style.height,
            CORNER_RADIUS,
            &style.background_color,
        ))
        .child(
            Element::new("text")
                .attr("font-family", &style.font_family)
                .attr("font-weight", &style.font_weight)
                .attr("font-size", format_args!("{}px", style.font_size))
                .attr("fill", &style.color)
                .attr("x", style.text_pos_x)
                .attr("y", style.text_pos_y)
                .text(placeholder_label(code, config)),
        )
}

/// Build the SVG tree for a highlight bar covering `character_count` characters
pub fn highlight_element(character_count: usize, config: &StyleConfig) -> Element {
    let style = &config.highlight;
    let count = u32::try_from(character_count).unwrap_or(u32::MAX);
    let width = style.width.saturating_mul(count);
    Element::svg(width, style.height)
        .attr(
            "viewBox",
            format_args!(
                "{} {} {} {}",
                style.offset_x, style.offset_y, width, style.height
            ),
        )
        .child(Element::rounded_rect(
            width,
            style.height,
            CORNER_RADIUS,
            &style.background_color,
        ))
}

/// Generate the image for one placeholder character code
pub fn build_placeholder_glyph(code: char, config: &StyleConfig) -> GeneratedResource {
    let markup = placeholder_element(code, config).to_markup();
    GeneratedResource::new(
        Glyph::Placeholder {
            code,
            label: placeholder_label(code, config),
        },
        &markup,
    )
}

/// Generate the background bar for a highlight `character_count` characters wide
pub fn build_highlight_bar(character_count: usize, config: &StyleConfig) -> GeneratedResource {
    let markup = highlight_element(character_count, config).to_markup();
    GeneratedResource::new(
        Glyph::Highlight {
            width: character_count,
        },
        &markup,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_markup() {
        let config = StyleConfig::default();
        let resource = build_placeholder_glyph('s', &config);

        assert!(resource.uri().starts_with(DATA_URI_PREFIX));
        assert_eq!(
            resource.markup(),
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="12" height="14">"#,
                r#"<rect width="12" height="14" rx="2" ry="2" style="fill: yellow;"/>"#,
                r#"<text font-family="Consolas" font-weight="bold" font-size="14px" fill="black" x="2" y="12">s</text>"#,
                "</svg>"
            )
        );
        assert_eq!(
            resource.glyph(),
            &Glyph::Placeholder {
                code: 's',
                label: "s".to_string()
            }
        );
    }

    #[test]
    fn test_placeholder_upper_case() {
        let mut config = StyleConfig::default();
        config.placeholder.upper_case = true;
        let resource = build_placeholder_glyph('s', &config);
        assert!(resource.markup().contains(">S</text>"));
    }

    #[test]
    fn test_placeholder_lower_cases_when_not_upper() {
        let config = StyleConfig::default();
        let resource = build_placeholder_glyph('Q', &config);
        assert!(resource.markup().contains(">q</text>"));
    }

    #[test]
    fn test_placeholder_escapes_code() {
        let config = StyleConfig::default();
        let resource = build_placeholder_glyph('<', &config);
        assert!(resource.markup().contains(">&lt;</text>"));
        assert!(!resource.markup().contains("><</text>"));
    }

    #[test]
    fn test_hash_color_is_percent_encoded() {
        let mut config = StyleConfig::default();
        config.placeholder.background_color = "#ff0".to_string();
        let resource = build_placeholder_glyph('a', &config);

        assert!(!resource.uri().contains('#'));
        assert!(resource.uri().contains("fill: %23ff0;"));
        assert!(resource.markup().contains("fill: #ff0;"));
    }

    #[test]
    fn test_highlight_markup() {
        let mut config = StyleConfig::default();
        config.highlight.width = 6;
        config.highlight.offset_x = 1;
        config.highlight.offset_y = 2;
        let resource = build_highlight_bar(3, &config);

        assert_eq!(
            resource.markup(),
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="14" viewBox="1 2 18 14">"#,
                r#"<rect width="18" height="14" rx="2" ry="2" style="fill: yellow;"/>"#,
                "</svg>"
            )
        );
        assert!(!resource.markup().contains("<text"));
        assert_eq!(resource.glyph(), &Glyph::Highlight { width: 3 });
    }

    #[test]
    fn test_builder_is_deterministic() {
        let config = StyleConfig::default();
        let a = build_placeholder_glyph('k', &config);
        let b = build_placeholder_glyph('k', &config);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }
}
