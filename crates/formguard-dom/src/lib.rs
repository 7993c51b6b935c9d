//! FormGuard DOM
//!
//! In-memory document tree the validation engine runs against, standing in
//! for the page environment: elements with attributes, class lists, values
//! and inline styles, a selector subset covering the engine's selection
//! contract, and the built-in constraint check the native fallback rule
//! delegates to. Nodes live in an arena and are addressed by [`NodeId`]
//! handles minted by the owning [`Document`].

use std::collections::HashMap;

use thiserror::Error;

mod selector;
mod validity;

pub use selector::Selector;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("node #{0} is not an element")]
    NotAnElement(usize),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("node #{reference} is not a child of node #{parent}")]
    NotAChild { parent: usize, reference: usize },
}

/// Handle to a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// One element: tag, attributes, and the live state validation touches.
///
/// `value`, `disabled` and `required` are seeded from attributes at creation
/// time and mutate independently afterwards, the way the live DOM treats
/// them.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: HashMap<String, String>,
    classes: Vec<String>,
    value: String,
    style: HashMap<String, String>,
    disabled: bool,
    required: bool,
}

impl Element {
    fn new(tag: String, attrs: HashMap<String, String>) -> Self {
        let classes = attrs
            .get("class")
            .map(|list| list.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let value = attrs.get("value").cloned().unwrap_or_default();
        let disabled = attrs.contains_key("disabled");
        let required = attrs.contains_key("required");
        Self {
            tag,
            attrs,
            classes,
            value,
            style: HashMap::new(),
            disabled,
            required,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// An in-memory document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Creates an element under `parent` with the given attributes.
    pub fn create_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_detached_element(tag, attrs);
        self.append_child(parent, id);
        id
    }

    /// Creates an element with no parent; attach it with [`append_child`]
    /// or [`insert_before`].
    ///
    /// [`append_child`]: Document::append_child
    /// [`insert_before`]: Document::insert_before
    pub fn create_detached_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let attrs: HashMap<String, String> = attrs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.create_node(NodeKind::Element(Element::new(tag.to_string(), attrs)))
    }

    pub fn create_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_node(NodeKind::Text(text.to_string()));
        self.append_child(parent, id);
        id
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    /// Appends `child` as the last child of `parent`, detaching it from its
    /// current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Inserts `node` into `parent`'s children immediately before
    /// `reference`, detaching `node` from its current parent first.
    pub fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: NodeId) -> Result<()> {
        self.detach(node);
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|child| *child == reference)
            .ok_or(DomError::NotAChild {
                parent: parent.0,
                reference: reference.0,
            })?;
        self.nodes[parent.0].children.insert(position, node);
        self.nodes[node.0].parent = Some(parent);
        Ok(())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// The node's ancestors, nearest first, ending at the document root.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = self.parent(ancestor);
        }
        chain
    }

    pub(crate) fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes[node.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut Element> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(node.0)),
        }
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::tag)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|element| element.attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self.element_mut(node)?;
        element.attrs.insert(name.to_string(), value.to_string());
        match name {
            "class" => {
                element.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "disabled" => element.disabled = true,
            "required" => element.required = true,
            _ => {}
        }
        Ok(())
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.element(node)
            .map(|element| element.attrs.contains_key(name))
            .unwrap_or(false)
    }

    pub fn value(&self, node: NodeId) -> Result<&str> {
        self.element(node)
            .map(|element| element.value.as_str())
            .ok_or(DomError::NotAnElement(node.0))
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.element_mut(node)?.value = value.to_string();
        Ok(())
    }

    /// Adds a class if absent. Idempotent.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        let element = self.element_mut(node)?;
        if !element.classes.iter().any(|existing| existing == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    /// Removes a class if present. Idempotent.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        self.element_mut(node)?
            .classes
            .retain(|existing| existing != class);
        Ok(())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|element| element.classes.iter().any(|existing| existing == class))
            .unwrap_or(false)
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.element(node)
            .map(|element| element.classes.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(node)?
            .style
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn style_property(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|element| element.style.get(name))
            .map(String::as_str)
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) -> Result<()> {
        self.element_mut(node)?.disabled = disabled;
        Ok(())
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.element(node)
            .map(|element| element.disabled)
            .unwrap_or(false)
    }

    pub fn is_required(&self, node: NodeId) -> bool {
        self.element(node)
            .map(|element| element.required)
            .unwrap_or(false)
    }

    /// Replaces the node's children with a single text node. An empty string
    /// just clears the children.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.element_mut(node)?;
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            self.create_text(node, text);
        }
        Ok(())
    }

    /// Concatenated text content of the node's descendants.
    pub fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            _ => {
                for child in &self.nodes[node.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// All elements under the document root matching `selector`, in
    /// document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.query_selector_all_within(self.root(), selector)
    }

    /// All elements strictly below `scope` matching `selector`, in document
    /// order.
    pub fn query_selector_all_within(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        let mut matches = Vec::new();
        self.collect_matches(scope, &selector, &mut matches);
        Ok(matches)
    }

    /// First element strictly below `scope` matching `selector`.
    pub fn query_selector_within(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        Ok(self
            .query_selector_all_within(scope, selector)?
            .into_iter()
            .next())
    }

    pub fn matches_selector(&self, node: NodeId, selector: &str) -> Result<bool> {
        let selector = Selector::parse(selector)?;
        Ok(selector.matches(self, node))
    }

    fn collect_matches(&self, node: NodeId, selector: &Selector, matches: &mut Vec<NodeId>) {
        for child in &self.nodes[node.0].children {
            if selector.matches(self, *child) {
                matches.push(*child);
            }
            self.collect_matches(*child, selector, matches);
        }
    }
}
