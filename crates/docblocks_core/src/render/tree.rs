//! Render tree types and HTML serialization.

use std::fmt::{Display, Formatter, Write};

/// Element tag of a render node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Keyed grouping without its own markup.
    Fragment,
    Strong,
    Em,
    Underline,
    Code,
    Span,
    Paragraph,
    /// Section heading, level 1..=6.
    Heading(u8),
    ListItem,
    UnorderedList,
    OrderedList,
    Blockquote,
    Pre,
    Div,
    Table,
    TableBody,
    TableRow,
    HeaderCell,
    DataCell,
}

impl Tag {
    /// HTML element name; `None` for fragments.
    pub fn html_name(self) -> Option<&'static str> {
        let name = match self {
            Self::Fragment => return None,
            Self::Strong => "strong",
            Self::Em => "em",
            Self::Underline => "u",
            Self::Code => "code",
            Self::Span => "span",
            Self::Paragraph => "p",
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
            Self::ListItem => "li",
            Self::UnorderedList => "ul",
            Self::OrderedList => "ol",
            Self::Blockquote => "blockquote",
            Self::Pre => "pre",
            Self::Div => "div",
            Self::Table => "table",
            Self::TableBody => "tbody",
            Self::TableRow => "tr",
            Self::HeaderCell => "th",
            Self::DataCell => "td",
        };
        Some(name)
    }
}

/// Stable sibling key: block id when present, else position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RenderKey {
    Id(String),
    Index(usize),
}

impl Display for RenderKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub key: Option<RenderKey>,
    pub classes: Vec<&'static str>,
    /// Inline CSS declarations in insertion order.
    pub style: Vec<(&'static str, String)>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<RenderNode>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            key: None,
            classes: Vec::new(),
            style: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: RenderKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.style.push((property, value.into()));
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<RenderNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| *candidate == class)
    }

    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Depth-first list of descendant elements with `tag`, excluding `self`.
    pub fn find_all(&self, tag: Tag) -> Vec<&Element> {
        let mut found = Vec::new();
        for child in &self.children {
            if let RenderNode::Element(element) = child {
                element.collect_tag(tag, &mut found);
            }
        }
        found
    }

    fn collect_tag<'a>(&'a self, tag: Tag, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for child in &self.children {
            if let RenderNode::Element(element) = child {
                element.collect_tag(tag, found);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let Some(name) = self.tag.html_name() else {
            for child in &self.children {
                child.write_html(out);
            }
            return;
        };

        out.push('<');
        out.push_str(name);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        if !self.style.is_empty() {
            let declarations = self
                .style
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape(&declarations));
        }
        for (attr, value) in &self.attrs {
            let _ = write!(out, " {attr}=\"{}\"", escape(value));
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{name}>");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Text(String),
    Element(Element),
}

impl RenderNode {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape(text)),
            Self::Element(element) => element.write_html(out),
        }
    }
}

impl From<Element> for RenderNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTree {
    pub root: Element,
}

impl RenderTree {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Top-level nodes, one per rendered block.
    pub fn blocks(&self) -> &[RenderNode] {
        &self.root.children
    }

    pub fn text_content(&self) -> String {
        self.root.text_content()
    }

    pub fn to_html(&self) -> String {
        self.root.to_html()
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
