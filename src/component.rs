use crate::element::{Node, PropValue, Props};
use crate::error::{RenderError, Result};
use smartstring::alias::String as SmartString;
use std::collections::HashMap;

/// Component state: named values, replaced wholesale on each update.
///
/// State is never shared between a renderer and its component instance;
/// updates build a new map with [`StateMap::merged`] and commit it in one
/// assignment.
#[derive(Debug, Clone, Default)]
pub struct StateMap {
    entries: HashMap<SmartString, PropValue>,
}

impl StateMap {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Builder form of [`StateMap::set`].
    pub fn with(mut self, name: impl Into<SmartString>, value: impl Into<PropValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<SmartString>, value: impl Into<PropValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries.get(name)
    }

    /// Pure shallow merge: a new map where entries of `partial` win over
    /// entries of `self`. Neither input is touched.
    pub fn merged(&self, partial: &StateMap) -> StateMap {
        let mut entries = self.entries.clone();
        for (name, value) in &partial.entries {
            entries.insert(name.clone(), value.clone());
        }
        StateMap { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// User-defined stateful component.
///
/// `render` is the one mandatory operation; the default body surfaces
/// [`RenderError::MissingRenderMethod`] so a component that forgets to
/// implement it fails with a defined error instead of an unspecified one.
/// The lifecycle hooks default to no-ops and `should_update` defaults to
/// always updating.
pub trait Component {
    /// Name used in diagnostics.
    fn type_name(&self) -> &str {
        "component"
    }

    /// State the instance starts with when it is mounted.
    fn initial_state(&self) -> StateMap {
        StateMap::new()
    }

    /// Produce the node this component currently renders as.
    fn render(&self, _props: &Props, _state: &StateMap) -> Result<Node> {
        Err(RenderError::MissingRenderMethod {
            component: self.type_name().to_string(),
        })
    }

    /// Runs before the first render, while mounting.
    fn will_mount(&mut self, _props: &Props, _state: &StateMap) {}

    /// Runs once the whole top-level subtree has mounted, children before
    /// parents.
    fn did_mount(&mut self) {}

    /// Returning `false` aborts an update before any re-render.
    fn should_update(&self, _next_props: &Props, _next_state: &StateMap) -> bool {
        true
    }

    /// Runs before a non-aborted update re-renders.
    fn will_update(&mut self, _next_props: &Props, _next_state: &StateMap) {}

    /// Runs after an update that reused the existing child subtree.
    fn did_update(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_partial_wins() {
        let state = StateMap::new().with("count", 1i64).with("label", "a");
        let partial = StateMap::new().with("count", 2i64);

        let next = state.merged(&partial);
        assert_eq!(next.get("count").and_then(PropValue::as_int), Some(2));
        assert_eq!(next.get("label").and_then(PropValue::as_str), Some("a"));
    }

    #[test]
    fn test_merged_is_pure() {
        let state = StateMap::new().with("count", 1i64);
        let partial = StateMap::new().with("count", 2i64);

        let _ = state.merged(&partial);
        assert_eq!(state.get("count").and_then(PropValue::as_int), Some(1));
        assert_eq!(partial.len(), 1);
    }

    #[test]
    fn test_default_render_is_a_defined_failure() {
        struct Bare;
        impl Component for Bare {
            fn type_name(&self) -> &str {
                "Bare"
            }
        }

        let err = Bare.render(&Props::new(), &StateMap::new()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingRenderMethod { component } if component == "Bare"
        ));
    }
}
