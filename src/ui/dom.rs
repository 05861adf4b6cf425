//! The document seam.
//!
//! Components never reach for ambient globals; they receive a `&mut dyn
//! Document` and a handful of [`NodeId`]s they captured at bootstrap. A
//! browser host implements [`Document`] over the real DOM. [`MemoryDocument`]
//! is the in-process implementation used by headless hosts and the tests.

use std::collections::BTreeMap;
use url::Url;

/// Opaque handle to an element of a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Position of an element in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A request to move the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    #[must_use]
    pub fn smooth(top: f64) -> Self {
        Self {
            top,
            behavior: ScrollBehavior::Smooth,
        }
    }

    #[must_use]
    pub fn instant(top: f64) -> Self {
        Self {
            top,
            behavior: ScrollBehavior::Instant,
        }
    }
}

/// Operations the interactive layer needs from a page.
///
/// The required methods are the primitive mutations and reads; queries such as
/// [`Document::element_by_id`] are provided on top of them. Mutating a node
/// that was removed is allowed and has no visible effect.
pub trait Document {
    /// The `<html>` element
    fn root(&self) -> NodeId;
    /// The `<body>` element
    fn body(&self) -> NodeId;
    /// URL the page was loaded from
    fn location(&self) -> &Url;

    fn create_element(&mut self, tag: &str) -> NodeId;
    /// Appends `child` to `parent`, detaching it from any previous parent first
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    /// Detaches `node` (and its subtree) from its parent
    fn remove(&mut self, node: NodeId);
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    /// Lowercase tag name
    fn tag(&self, node: NodeId) -> String;

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Text directly owned by `node`, not including descendants
    fn text(&self, node: NodeId) -> String;
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Layout box of `node`; `top` is the offset from the document top
    fn layout(&self, node: NodeId) -> Rect;
    fn viewport(&self) -> Viewport;
    fn scroll_to(&mut self, request: ScrollRequest);

    /// Whether `node` is attached to the document
    fn is_connected(&self, node: NodeId) -> bool {
        self.ancestors(node).last().copied() == Some(self.root())
    }

    /// `node` followed by its parent chain up to the topmost ancestor
    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = vec![node];
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Inclusive containment, mirroring `Node.contains`
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }

    /// Descendants of `node` in document order, excluding `node` itself
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        found
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&node| self.attribute(node, "id").as_deref() == Some(id))
    }

    /// Connected elements carrying `class`, in document order
    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&node| self.has_class(node, class))
            .collect()
    }

    /// Connected elements with the given tag, in document order
    fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&node| self.tag(node).eq_ignore_ascii_case(tag))
            .collect()
    }

    /// First descendant of `node` carrying `class`
    fn find_by_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|&child| self.has_class(child, class))
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    layout: Rect,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: String::new(),
            layout: Rect::default(),
        }
    }
}

/// In-memory [`Document`].
///
/// Nodes are never freed; removing one only detaches it, so stale handles stay
/// valid and simply report `is_connected() == false`.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    location: Url,
    viewport: Viewport,
    scroll_log: Vec<ScrollRequest>,
}

impl MemoryDocument {
    /// An empty `<html><body></body></html>` page loaded from `location`
    #[must_use]
    pub fn new(location: Url) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            location,
            viewport: Viewport {
                scroll_y: 0.0,
                height: 800.0,
            },
            scroll_log: Vec::new(),
        };
        let root = doc.create_element("html");
        let body = doc.create_element("body");
        doc.root = root;
        doc.body = body;
        doc.append_child(root, body);
        doc
    }

    /// Starts building a new element appended to `parent`
    pub fn build(&mut self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
        let node = self.create_element(tag);
        self.append_child(parent, node);
        ElementBuilder { doc: self, node }
    }

    pub fn set_layout(&mut self, node: NodeId, rect: Rect) {
        self.nodes[node.0].layout = rect;
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport.height = height;
    }

    /// Every scroll requested so far, oldest first
    #[must_use]
    pub fn scroll_log(&self) -> &[ScrollRequest] {
        &self.scroll_log
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> NodeId {
        self.root
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn location(&self) -> &Url {
        &self.location
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.contains(child, parent) {
            tracing::warn!(?parent, ?child, "refusing to append a node into its own subtree");
            return;
        }
        self.remove(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).children.clone()
    }

    fn tag(&self, node: NodeId) -> String {
        self.node(node).tag.clone()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.node_mut(node).classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).classes.retain(|c| c != class);
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        if name == "class" {
            let classes = &self.node(node).classes;
            return (!classes.is_empty()).then(|| classes.join(" "));
        }
        self.node(node).attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "class" {
            self.node_mut(node).classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        self.node_mut(node)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if name == "class" {
            self.node_mut(node).classes.clear();
            return;
        }
        self.node_mut(node).attributes.remove(name);
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.node(node).styles.get(property).cloned()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.node_mut(node)
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn text(&self, node: NodeId) -> String {
        self.node(node).text.clone()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.node_mut(node).text = text.to_string();
    }

    fn layout(&self, node: NodeId) -> Rect {
        self.node(node).layout
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, request: ScrollRequest) {
        self.viewport.scroll_y = request.top.max(0.0);
        self.scroll_log.push(request);
    }
}

/// Fluent construction of [`MemoryDocument`] elements
pub struct ElementBuilder<'a> {
    doc: &'a mut MemoryDocument,
    node: NodeId,
}

impl ElementBuilder<'_> {
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(self, class: &str) -> Self {
        self.doc.add_class(self.node, class);
        self
    }

    #[must_use]
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.doc.set_attribute(self.node, name, value);
        self
    }

    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.doc.set_text(self.node, text);
        self
    }

    #[must_use]
    pub fn layout(self, top: f64, height: f64) -> Self {
        self.doc.set_layout(self.node, Rect::new(top, height));
        self
    }

    /// Finishes the element and returns its handle
    #[must_use]
    pub fn node(self) -> NodeId {
        self.node
    }
}
