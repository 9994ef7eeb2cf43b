//! Node types: NodeId, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

use crate::geometry::Rect;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single element of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Lowercase tag name (e.g. "section", "a", "span").
    pub tag: String,
    /// Optional unique id (`id` attribute, CSS #id selector).
    pub id: Option<String>,
    /// CSS classes, in insertion order.
    pub classes: Vec<String>,
    /// `data-*` attributes, keyed without the `data-` prefix.
    pub dataset: BTreeMap<String, String>,
    /// Remaining attributes (`href`, `alt`, ...).
    pub attributes: BTreeMap<String, String>,
    /// Inline style declarations written by behaviors.
    pub style: BTreeMap<String, String>,
    /// Text content.
    pub text: String,
    /// Layout box in document coordinates, supplied by the host.
    pub rect: Rect,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            dataset: BTreeMap::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            text: String::new(),
            rect: Rect::ZERO,
        }
    }

    /// Set the element id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple CSS classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            self = self.with_class(class);
        }
        self
    }

    /// Set a `data-*` attribute (builder). `key` is given without the prefix.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    /// Set an arbitrary attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the `href` attribute (builder).
    pub fn with_href(self, href: impl Into<String>) -> Self {
        self.with_attr("href", href)
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the layout box (builder).
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Set an inline style property (builder).
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    /// Check whether this node has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. Returns `true` if the class was not present before.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_owned());
        true
    }

    /// Remove a CSS class. Returns `true` if it was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// Add or remove `class` depending on `on`.
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Look up a `data-*` attribute by its unprefixed key.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    /// Look up an attribute by its HTML name.
    ///
    /// `id` and `data-*` names resolve to the dedicated fields.
    pub fn attr(&self, name: &str) -> Option<&str> {
        if name == "id" {
            return self.id.as_deref();
        }
        if let Some(key) = name.strip_prefix("data-") {
            return self.data(key);
        }
        self.attributes.get(name).map(String::as_str)
    }

    /// The `href` attribute, if any.
    pub fn href(&self) -> Option<&str> {
        self.attributes.get("href").map(String::as_str)
    }

    /// Read an inline style property.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Write an inline style property.
    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.style.insert(property.to_owned(), value.into());
    }
}
