use crate::component::StateMap;
use crate::dom::{DocumentSink, MemoryDocument};
use crate::element::{Element, Node};
use crate::error::{RenderError, Result};
use crate::events::EventRegistry;
use crate::path::{PathId, RootAllocator};
use crate::render::{RendererInstance, TreeCtx, instantiate};

/// Entry object tying the engine's collaborators together.
///
/// Owns the document sink, the event registry, the root path allocator
/// and the mounted renderer tree. Because all of them sit behind one
/// `&mut self`, updates cannot re-enter from inside hooks or event
/// handlers; re-entrancy is ruled out by ownership rather than by a
/// runtime guard.
pub struct App<D: DocumentSink> {
    doc: D,
    events: EventRegistry,
    roots: RootAllocator,
    tree: Option<RendererInstance>,
}

impl App<MemoryDocument> {
    /// App rendering into an in-memory document.
    pub fn in_memory() -> Self {
        Self::new(MemoryDocument::new())
    }
}

impl<D: DocumentSink> App<D> {
    pub fn new(doc: D) -> Self {
        Self {
            doc,
            events: EventRegistry::new(),
            roots: RootAllocator::new(),
            tree: None,
        }
    }

    /// Instantiate and mount `node` at a fresh root path, write the
    /// resulting markup into the document, then run the completion walk
    /// (did-mount hooks, children before parents).
    ///
    /// Mounting again tears down the previous tree's listeners first.
    pub fn mount(&mut self, node: Node) -> Result<PathId> {
        if let Some(old) = self.tree.take() {
            if let Some(path) = old.path() {
                self.events.remove_subtree(path);
            }
        }

        let path = self.roots.get();
        tracing::debug!("mounting tree at root {}", path);

        let mut tree = instantiate(node)?;
        let markup = {
            let mut ctx = TreeCtx {
                doc: &mut self.doc,
                events: &mut self.events,
            };
            tree.mount(path.clone(), &mut ctx)?
        };
        self.doc.write_root(&markup);
        tree.notify_mounted();
        self.tree = Some(tree);
        Ok(path)
    }

    /// Re-enter the root renderer with a new element, a partial state, or
    /// both.
    pub fn update(
        &mut self,
        next: Option<Element>,
        partial_state: Option<StateMap>,
    ) -> Result<()> {
        let Some(tree) = self.tree.as_mut() else {
            return Err(RenderError::NotMounted);
        };
        let mut ctx = TreeCtx {
            doc: &mut self.doc,
            events: &mut self.events,
        };
        tree.receive(next.map(Node::Element), partial_state, &mut ctx)
    }

    /// Merge `partial` into the root component's state and update.
    pub fn set_state(&mut self, partial: StateMap) -> Result<()> {
        self.update(None, Some(partial))
    }

    /// Deliver an event to every handler registered for `kind` at
    /// `target`. Returns how many handlers ran.
    pub fn dispatch(&self, kind: &str, target: &PathId) -> usize {
        self.events.dispatch(kind, target)
    }

    /// The document sink.
    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    /// The event registry.
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Root path of the currently mounted tree.
    pub fn root_path(&self) -> Option<&PathId> {
        self.tree.as_ref().and_then(|t| t.path())
    }

    /// The mounted renderer tree.
    pub fn tree(&self) -> Option<&RendererInstance> {
        self.tree.as_ref()
    }
}
