//! Minimal SVG element tree
//!
//! Elements are built with typed attribute values and serialized compactly
//! (no whitespace between nodes). Text and attribute values are escaped on
//! output, so character codes from configuration can't break the markup.

use std::fmt::{self, Display, Write};

/// The SVG namespace declared on every root element
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A child node of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A single element with ordered attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Root `<svg>` element with the namespace and canvas size set
    pub fn svg(width: u32, height: u32) -> Self {
        Self::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("width", width)
            .attr("height", height)
    }

    /// Rounded rectangle filling a `width`×`height` area
    pub fn rounded_rect(width: u32, height: u32, radius: u32, fill: &str) -> Self {
        Self::new("rect")
            .attr("width", width)
            .attr("height", height)
            .attr("rx", radius)
            .attr("ry", radius)
            .attr("style", format_args!("fill: {};", fill))
    }

    /// Builder: add an attribute
    pub fn attr(mut self, key: &'static str, value: impl Display) -> Self {
        self.attrs.push((key, value.to_string()));
        self
    }

    /// Builder: add a child element
    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    /// Builder: add a text node
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Serialize to compact markup
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        // Writing into a String can't fail
        let _ = self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) -> fmt::Result {
        write!(out, "<{}", self.name)?;
        for (key, value) in &self.attrs {
            write!(out, " {}=\"", key)?;
            escape_into(out, value, true);
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return Ok(());
        }

        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_markup(out)?,
                Node::Text(text) => escape_into(out, text, false),
            }
        }
        write!(out, "</{}>", self.name)
    }
}

/// Append `s` with XML special characters replaced by entities
fn escape_into(out: &mut String, s: &str, in_attr: bool) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            '\'' if in_attr => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}
