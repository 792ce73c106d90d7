//! Display tree: a plain-data description of what a card shows.
//!
//! Nothing here knows about a particular UI toolkit. The [`fmt::Display`] impl emits
//! HTML-style markup, which is one possible host; the serde impl is another.

use serde::Serialize;
use std::fmt;

/// Element kinds a card is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Div,
    H3,
    Span,
    P,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::H3 => "h3",
            Tag::Span => "span",
            Tag::P => "p",
        }
    }
}

/// What an activatable control asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Edit,
    Delete,
}

impl Action {
    /// The literal word shown on the control.
    pub fn label(self) -> &'static str {
        match self {
            Action::Edit => "Edit",
            Action::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Button(Button),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    tag: Tag,
    class: String,
    children: Vec<Node>,
}

/// An activatable control. Only obtainable from a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    action: Action,
    class: String,
    text: String,
    aria_label: String,
}

impl Element {
    pub(crate) fn new(tag: Tag, class: impl Into<String>) -> Self {
        Self {
            tag,
            class: class.into(),
            children: Vec::new(),
        }
    }

    pub(crate) fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub(crate) fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

impl Button {
    pub(crate) fn new(action: Action, class: impl Into<String>, aria_label: impl Into<String>) -> Self {
        Self {
            action,
            class: class.into(),
            text: action.label().to_string(),
            aria_label: aria_label.into(),
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn aria_label(&self) -> &str {
        &self.aria_label
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Button> for Node {
    fn from(button: Button) -> Self {
        Node::Button(button)
    }
}

impl Node {
    /// True if the node's whitespace-separated class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        let classes = match self {
            Node::Element(element) => &element.class,
            Node::Button(button) => &button.class,
            Node::Text(_) => return false,
        };
        classes.split_whitespace().any(|c| c == class)
    }

    /// First node in depth-first order carrying `class`, including `self`.
    pub fn find_by_class(&self, class: &str) -> Option<&Node> {
        if self.has_class(class) {
            return Some(self);
        }
        match self {
            Node::Element(element) => element
                .children
                .iter()
                .find_map(|child| child.find_by_class(class)),
            _ => None,
        }
    }

    /// All text below this node, concatenated in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Button(button) => out.push_str(&button.text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Every control in the tree, in document order.
    pub fn buttons(&self) -> Vec<&Button> {
        let mut found = Vec::new();
        self.collect_buttons(&mut found);
        found
    }

    fn collect_buttons<'a>(&'a self, found: &mut Vec<&'a Button>) {
        match self {
            Node::Button(button) => found.push(button),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_buttons(found);
                }
            }
            Node::Text(_) => {}
        }
    }

    /// The first control for `action`, if the tree has one.
    pub fn button(&self, action: Action) -> Option<&Button> {
        self.buttons().into_iter().find(|b| b.action == action)
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Text(text) => f.write_str(&escape(text)),
            Node::Button(button) => write!(
                f,
                "<button class=\"{}\" aria-label=\"{}\">{}</button>",
                escape(&button.class),
                escape(&button.aria_label),
                escape(&button.text)
            ),
            Node::Element(element) => {
                let tag = element.tag.as_str();
                write!(f, "<{} class=\"{}\">", tag, escape(&element.class))?;
                for child in &element.children {
                    write!(f, "{}", child)?;
                }
                write!(f, "</{}>", tag)
            }
        }
    }
}
