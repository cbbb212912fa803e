use super::{RendererInstance, TreeCtx, instantiate};
use crate::element::{CHILDREN, Element, ElementKind, Node, PropValue};
use crate::error::{RenderError, Result};
use crate::events::event_prop_kind;
use crate::path::PathId;
use smartstring::alias::String as SmartString;

/// Renderer for structured nodes: tag, attributes, delegated events and
/// recursively mounted children.
pub struct HostRenderer {
    tag: SmartString,
    element: Element,
    path: Option<PathId>,
    children: Vec<RendererInstance>,
}

impl HostRenderer {
    pub(crate) fn new(tag: SmartString, element: Element) -> Self {
        Self {
            tag,
            element,
            path: None,
            children: Vec::new(),
        }
    }

    /// Build the opening tag, register event props, then instantiate and
    /// mount each child at `path.i`.
    pub fn mount(&mut self, path: PathId, ctx: &mut TreeCtx<'_>) -> Result<String> {
        tracing::debug!("mounting <{}> at {}", self.tag, path);

        let mut tag_open = format!("<{} data-reactid={}", self.tag, path);
        let tag_close = format!("</{}>", self.tag);

        for (name, value) in self.element.props.iter() {
            if let Some(kind) = event_prop_kind(name) {
                if let PropValue::Handler(handler) = value {
                    ctx.events.register(kind, path.clone(), handler.clone());
                } else {
                    tracing::trace!("event prop `{}` at {} holds no handler", name, path);
                }
                continue;
            }
            if name == CHILDREN {
                continue;
            }
            if value.is_truthy() {
                tag_open.push_str(&format!(" {}={}", name, value.to_display_string()));
            }
        }

        let mut content = String::new();
        let mut mounted = Vec::new();
        for (index, child) in self.element.props.child_nodes().into_iter().enumerate() {
            let mut instance = instantiate(child)?;
            let child_markup = instance.mount(path.child(index), ctx)?;
            content.push(' ');
            content.push_str(&child_markup);
            mounted.push(instance);
        }

        self.children = mounted;
        self.path = Some(path);
        Ok(format!("{tag_open}>{content}{tag_close}"))
    }

    /// Record a new descriptor without touching mounted markup.
    ///
    /// There is no in-place update below a reused host: attribute and
    /// child changes only reach the document through wholesale
    /// replacement from an ancestor composite.
    pub(crate) fn receive(&mut self, next: Option<Node>) -> Result<()> {
        let Some(node) = next else {
            return Ok(());
        };
        match node {
            Node::Element(element) => {
                match &element.kind {
                    ElementKind::Host(tag) => self.tag = tag.clone(),
                    ElementKind::Composite(_) => {
                        return Err(RenderError::InvalidElementNode {
                            found: "composite element in host position".to_string(),
                        });
                    }
                }
                tracing::trace!("host at {:?} recorded new descriptor", self.path);
                self.element = element;
                Ok(())
            }
            other => Err(RenderError::InvalidElementNode {
                found: other.shape_name().to_string(),
            }),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn path(&self) -> Option<&PathId> {
        self.path.as_ref()
    }

    /// Mounted child instances, in order.
    pub fn children(&self) -> &[RendererInstance] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [RendererInstance] {
        &mut self.children
    }

    pub(crate) fn current_node(&self) -> Node {
        Node::Element(self.element.clone())
    }
}
