mod composite;
mod host;
mod text;

pub use composite::CompositeRenderer;
pub use host::HostRenderer;
pub use text::TextRenderer;

use crate::component::StateMap;
use crate::dom::DocumentSink;
use crate::element::{ElementKind, Node};
use crate::error::{RenderError, Result};
use crate::events::EventRegistry;
use crate::path::PathId;

/// Collaborators threaded through mount and update: the document sink and
/// the event registry. Owned by the entry call, never global.
pub struct TreeCtx<'a> {
    pub doc: &'a mut dyn DocumentSink,
    pub events: &'a mut EventRegistry,
}

/// A live renderer, one of three variants chosen once per tree position.
///
/// Every operation pattern-matches on the tag; node shapes are inspected
/// exactly once, in [`instantiate`].
pub enum RendererInstance {
    Text(TextRenderer),
    Host(HostRenderer),
    Composite(CompositeRenderer),
}

impl std::fmt::Debug for RendererInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self {
            RendererInstance::Text(_) => "Text",
            RendererInstance::Host(_) => "Host",
            RendererInstance::Composite(_) => "Composite",
        };
        write!(f, "RendererInstance::{variant}")
    }
}

/// Classify a declarative node into its renderer variant.
///
/// In order: primitives become text renderers, host elements become host
/// renderers, composite elements become composite renderers. Anything
/// else is a hard failure, never a silent null.
pub fn instantiate(node: Node) -> Result<RendererInstance> {
    match node {
        Node::Str(_) | Node::Int(_) | Node::Float(_) => {
            Ok(RendererInstance::Text(TextRenderer::new(node)))
        }
        Node::Element(element) => match element.kind.clone() {
            ElementKind::Host(tag) => Ok(RendererInstance::Host(HostRenderer::new(tag, element))),
            ElementKind::Composite(kind) => Ok(RendererInstance::Composite(
                CompositeRenderer::new(kind, element),
            )),
        },
        Node::Null | Node::Bool(_) => Err(RenderError::InvalidElementNode {
            found: node.shape_name().to_string(),
        }),
    }
}

impl RendererInstance {
    /// Mount at `path`, producing the markup for this subtree.
    pub fn mount(&mut self, path: PathId, ctx: &mut TreeCtx<'_>) -> Result<String> {
        match self {
            RendererInstance::Text(text) => text.mount(path),
            RendererInstance::Host(host) => host.mount(path, ctx),
            RendererInstance::Composite(composite) => composite.mount(path, ctx),
        }
    }

    /// Deliver an update.
    ///
    /// Composites run the full update pipeline; text and host renderers
    /// only record the descriptor (their content changes solely through
    /// wholesale replacement from an ancestor).
    pub fn receive(
        &mut self,
        next: Option<Node>,
        partial_state: Option<StateMap>,
        ctx: &mut TreeCtx<'_>,
    ) -> Result<()> {
        match self {
            RendererInstance::Text(text) => text.receive(next),
            RendererInstance::Host(host) => host.receive(next),
            RendererInstance::Composite(composite) => {
                let next_element = match next {
                    None => None,
                    Some(Node::Element(element)) => Some(element),
                    Some(other) => {
                        return Err(RenderError::InvalidElementNode {
                            found: other.shape_name().to_string(),
                        });
                    }
                };
                composite.receive(next_element, partial_state, ctx)
            }
        }
    }

    /// Post-order completion walk: children see their did-mount hook
    /// strictly before their parents.
    pub(crate) fn notify_mounted(&mut self) {
        match self {
            RendererInstance::Text(_) => {}
            RendererInstance::Host(host) => {
                for child in host.children_mut() {
                    child.notify_mounted();
                }
            }
            RendererInstance::Composite(composite) => composite.notify_mounted(),
        }
    }

    /// The descriptor this renderer currently stands for.
    pub fn current_node(&self) -> Node {
        match self {
            RendererInstance::Text(text) => text.current_node(),
            RendererInstance::Host(host) => host.current_node(),
            RendererInstance::Composite(composite) => composite.current_node(),
        }
    }

    pub fn path(&self) -> Option<&PathId> {
        match self {
            RendererInstance::Text(text) => text.path(),
            RendererInstance::Host(host) => host.path(),
            RendererInstance::Composite(composite) => composite.path(),
        }
    }
}
