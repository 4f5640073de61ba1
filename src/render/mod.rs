//! Pure render engine
//!
//! Render functions map list or workflow state to a structured [`Node`]
//! tree. The tree carries tags, semantic classes and text only; turning it
//! into terminal output (or any other surface) is a serializer concern, so
//! the functions stay unit-testable without a host environment.

pub mod books;
pub mod loans;
pub mod members;

use chrono::{DateTime, Utc};

/// List state as seen by a render function
///
/// `Failed` and an empty `Ready` list are distinct: a failed load renders an
/// error row, an empty collection renders an empty-state row.
#[derive(Debug, Clone, Copy)]
pub enum Listing<'a, T> {
    Loading,
    Failed,
    Ready(&'a [T]),
}

/// A node in the rendered tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// Tagged element with semantic classes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    /// Control value, for options and prefilled inputs
    pub value: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

/// Shorthand element constructor
pub fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl Node {
    /// All text content of the subtree, joined for assertions and search
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Depth-first lookup of the first element carrying a class
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        match self {
            Node::Text(_) => None,
            Node::Element(element) => {
                if element.has_class(class) {
                    return Some(element);
                }
                element.children.iter().find_map(|child| child.find_class(class))
            }
        }
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => {
            if !out.is_empty() && !out.ends_with(char::is_whitespace) {
                out.push(' ');
            }
            out.push_str(text);
        }
        Node::Element(element) => {
            for child in &element.children {
                collect_text(child, out);
            }
        }
    }
}

/// Serialize a tree to plain terminal text, one line per block element
pub fn to_text(node: &Node) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();
    flatten(node, &mut lines, &mut current);
    if !current.trim().is_empty() {
        lines.push(current.trim().to_string());
    }
    lines.join("\n")
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "tr" | "div" | "p" | "li" | "section" | "article" | "h1" | "h2" | "h3" | "h4" | "h5"
            | "h6" | "option" | "hr"
    )
}

fn flatten(node: &Node, lines: &mut Vec<String>, current: &mut String) {
    match node {
        Node::Text(text) => {
            if !current.is_empty() && !current.ends_with(char::is_whitespace) {
                current.push(' ');
            }
            current.push_str(text);
        }
        Node::Element(element) => {
            let block = is_block(element.tag);
            for child in &element.children {
                flatten(child, lines, current);
            }
            if block && !current.trim().is_empty() {
                lines.push(current.trim().to_string());
                current.clear();
            }
        }
    }
}

/// Short date for table cells, `N/A` when the server sent none
pub fn fmt_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => "N/A".to_string(),
    }
}

/// Date and time for loan cards and receipts
pub fn fmt_datetime(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y, %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}
