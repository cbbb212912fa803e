use super::{RendererInstance, TreeCtx, instantiate};
use crate::component::{Component, StateMap};
use crate::element::{ComponentKind, Element, ElementKind, Props};
use crate::error::{RenderError, Result};
use crate::path::PathId;
use crate::reconcile::should_reuse;

/// Everything a composite owns once it has mounted.
struct MountedComposite {
    path: PathId,
    /// Props last committed onto the instance. Deliberately distinct from
    /// the current element's props: an aborted update keeps the new
    /// element but not its props.
    props: Props,
    state: StateMap,
    instance: Box<dyn Component>,
    child: Box<RendererInstance>,
}

/// Renderer wrapping a user-defined stateful component.
///
/// Transparent in the path hierarchy: the single child produced by
/// `render` mounts at the composite's own path id.
pub struct CompositeRenderer {
    kind: ComponentKind,
    element: Element,
    mounted: Option<MountedComposite>,
}

impl CompositeRenderer {
    pub(crate) fn new(kind: ComponentKind, element: Element) -> Self {
        Self {
            kind,
            element,
            mounted: None,
        }
    }

    /// Construct the instance, run the will-mount hook, render, and mount
    /// the rendered child at the same path. The did-mount hook runs later,
    /// during the completion walk.
    pub fn mount(&mut self, path: PathId, ctx: &mut TreeCtx<'_>) -> Result<String> {
        tracing::debug!("mounting composite `{}` at {}", self.kind.name(), path);

        let props = self.element.props.clone();
        let mut instance = self.kind.construct(&props);
        let state = instance.initial_state();
        instance.will_mount(&props, &state);

        let rendered = instance.render(&props, &state)?;
        let mut child = Box::new(instantiate(rendered)?);
        let markup = child.mount(path.clone(), ctx)?;

        self.mounted = Some(MountedComposite {
            path,
            props,
            state,
            instance,
            child,
        });
        Ok(markup)
    }

    /// Re-enter this composite with a new element, a partial state, or
    /// both.
    ///
    /// The merged state commits before the should-update guard; props
    /// commit only after a non-aborted update, and the re-render itself
    /// still observes the previously committed props.
    pub fn receive(
        &mut self,
        next_element: Option<Element>,
        partial_state: Option<StateMap>,
        ctx: &mut TreeCtx<'_>,
    ) -> Result<()> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Err(RenderError::NotMounted);
        };

        if let Some(element) = next_element {
            match &element.kind {
                ElementKind::Composite(kind) => self.kind = kind.clone(),
                ElementKind::Host(_) => {
                    return Err(RenderError::InvalidElementNode {
                        found: "host element in composite position".to_string(),
                    });
                }
            }
            self.element = element;
        }

        let next_state = match &partial_state {
            Some(partial) => mounted.state.merged(partial),
            None => mounted.state.clone(),
        };
        mounted.state = next_state;

        let next_props = self.element.props.clone();

        if !mounted.instance.should_update(&next_props, &mounted.state) {
            tracing::debug!(
                "composite `{}` at {} skipped update",
                self.kind.name(),
                mounted.path
            );
            return Ok(());
        }

        mounted.instance.will_update(&next_props, &mounted.state);

        // the re-render observes previously committed props with the
        // merged next state; props commit below, after reconciliation
        let next_rendered = mounted.instance.render(&mounted.props, &mounted.state)?;
        let prev_rendered = mounted.child.current_node();

        if should_reuse(Some(&prev_rendered), Some(&next_rendered)) {
            tracing::debug!("reusing child subtree at {}", mounted.path);
            mounted.child.receive(Some(next_rendered), None, ctx)?;
            mounted.instance.did_update();
        } else {
            tracing::debug!("replacing child subtree at {}", mounted.path);
            ctx.events.remove_subtree(&mounted.path);
            let mut fresh = Box::new(instantiate(next_rendered)?);
            let markup = fresh.mount(mounted.path.clone(), ctx)?;
            ctx.doc.replace(&mounted.path, &markup)?;
            fresh.notify_mounted();
            mounted.child = fresh;
        }

        mounted.props = next_props;
        Ok(())
    }

    pub(crate) fn notify_mounted(&mut self) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.child.notify_mounted();
            mounted.instance.did_mount();
        }
    }

    pub fn path(&self) -> Option<&PathId> {
        self.mounted.as_ref().map(|m| &m.path)
    }

    /// State last committed onto the instance.
    pub fn state(&self) -> Option<&StateMap> {
        self.mounted.as_ref().map(|m| &m.state)
    }

    /// Props last committed onto the instance.
    pub fn committed_props(&self) -> Option<&Props> {
        self.mounted.as_ref().map(|m| &m.props)
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub(crate) fn current_node(&self) -> crate::element::Node {
        crate::element::Node::Element(self.element.clone())
    }

    /// The renderer mounted for this composite's render output.
    pub fn child(&self) -> Option<&RendererInstance> {
        self.mounted.as_ref().map(|m| m.child.as_ref())
    }
}
