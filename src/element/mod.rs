mod props;

pub use props::{CHILDREN, PropValue, Props};

use crate::component::Component;
use smartstring::alias::String as SmartString;
use std::fmt;
use std::rc::Rc;

/// A position in a declarative tree.
///
/// `Str`, `Int` and `Float` are the primitive shapes rendered as text;
/// `Element` is the structured shape. `Null` and `Bool` can appear in a
/// tree (a suppressed conditional child, for example) but have no renderer
/// variant and fail classification.
#[derive(Debug, Clone)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(SmartString),
    Element(Element),
}

impl Node {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Node::Str(_) | Node::Int(_) | Node::Float(_))
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Int(_) => "int",
            Node::Float(_) => "float",
            Node::Str(_) => "string",
            Node::Element(_) => "element",
        }
    }

    /// Text content of a primitive node.
    pub fn primitive_text(&self) -> Option<SmartString> {
        match self {
            Node::Str(s) => Some(s.clone()),
            Node::Int(i) => Some(i.to_string().into()),
            Node::Float(f) => Some(f.to_string().into()),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Str(value.into())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Str(value.into())
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Int(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

/// Named constructor for user components.
///
/// Identity is reference identity of the constructor closure, so two kinds
/// are the same only if they came from the same `ComponentKind` value (or
/// a clone of it).
#[derive(Clone)]
pub struct ComponentKind {
    name: SmartString,
    construct: Rc<dyn Fn(&Props) -> Box<dyn Component>>,
}

impl ComponentKind {
    pub fn new(
        name: impl Into<SmartString>,
        construct: impl Fn(&Props) -> Box<dyn Component> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            construct: Rc::new(construct),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a fresh component instance from `props`.
    pub fn construct(&self, props: &Props) -> Box<dyn Component> {
        (self.construct)(props)
    }

    pub fn same_kind(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.construct, &other.construct)
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentKind")
            .field("name", &self.name)
            .finish()
    }
}

/// What an element renders as: a markup tag or a user component.
#[derive(Debug, Clone)]
pub enum ElementKind {
    Host(SmartString),
    Composite(ComponentKind),
}

impl ElementKind {
    /// Kind identity for reconciliation: tag equality for hosts,
    /// constructor identity for composites.
    pub fn same_kind(&self, other: &Self) -> bool {
        match (self, other) {
            (ElementKind::Host(a), ElementKind::Host(b)) => a == b,
            (ElementKind::Composite(a), ElementKind::Composite(b)) => a.same_kind(b),
            _ => false,
        }
    }
}

impl From<&str> for ElementKind {
    fn from(tag: &str) -> Self {
        ElementKind::Host(tag.into())
    }
}

impl From<ComponentKind> for ElementKind {
    fn from(kind: ComponentKind) -> Self {
        ElementKind::Composite(kind)
    }
}

/// Immutable declarative description of a node: kind, identity key, props.
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub key: Option<SmartString>,
    pub props: Props,
}

impl Element {
    pub fn new(kind: impl Into<ElementKind>, props: Props) -> Self {
        Self {
            kind: kind.into(),
            key: None,
            props,
        }
    }

    pub fn with_key(mut self, key: impl Into<SmartString>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Child argument accepted by [`create_element`].
pub enum Children {
    None,
    One(Node),
    Many(Vec<Node>),
}

impl From<()> for Children {
    fn from(_: ()) -> Self {
        Children::None
    }
}

impl From<Node> for Children {
    fn from(node: Node) -> Self {
        Children::One(node)
    }
}

impl From<Vec<Node>> for Children {
    fn from(nodes: Vec<Node>) -> Self {
        Children::Many(nodes)
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Children::One(Node::Str(text.into()))
    }
}

impl From<Element> for Children {
    fn from(element: Element) -> Self {
        Children::One(Node::Element(element))
    }
}

/// Build an element descriptor from a kind, props and children.
///
/// A `key` entry in `props` is lifted onto the descriptor itself; children
/// are always stored as an ordered sequence (a single child is wrapped).
pub fn create_element(
    kind: impl Into<ElementKind>,
    mut props: Props,
    children: impl Into<Children>,
) -> Element {
    let key = match props.remove("key") {
        None | Some(PropValue::Nil) => None,
        Some(PropValue::Str(s)) => Some(s),
        Some(other) => Some(other.to_display_string().into()),
    };
    let children = match children.into() {
        Children::None => Vec::new(),
        Children::One(node) => vec![node],
        Children::Many(nodes) => nodes,
    };
    props.set(CHILDREN, PropValue::Nodes(children));
    Element {
        kind: kind.into(),
        key,
        props,
    }
}
