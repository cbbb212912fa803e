use crate::path::PathId;
use smallvec::SmallVec;
use smartstring::alias::String as SmartString;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Payload delivered to a handler when an event is dispatched.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: SmartString,
    pub target: PathId,
}

/// Callback registered for a delegated event.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    pub fn new(handler: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }

    /// Handlers compare by reference identity only.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler")
    }
}

type HandlerList = SmallVec<[EventHandler; 1]>;

/// Ownership map from `(event kind, path id)` to the handlers registered
/// there.
///
/// Registration is additive; teardown removes a path id and everything
/// below it in one sweep, so re-mounting at a path never observes stale
/// handlers.
pub struct EventRegistry {
    handlers: HashMap<(SmartString, PathId), HandlerList>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a delegated listener scoped to `path`.
    pub fn register(&mut self, kind: impl Into<SmartString>, path: PathId, handler: EventHandler) {
        let kind = kind.into();
        tracing::trace!("registering `{}` listener at {}", kind, path);
        self.handlers.entry((kind, path)).or_default().push(handler);
    }

    /// Invoke every handler registered for `kind` at `target`.
    ///
    /// Returns how many handlers ran.
    pub fn dispatch(&self, kind: &str, target: &PathId) -> usize {
        let key = (SmartString::from(kind), target.clone());
        let Some(handlers) = self.handlers.get(&key) else {
            return 0;
        };
        let event = Event {
            kind: key.0,
            target: target.clone(),
        };
        for handler in handlers {
            handler.call(&event);
        }
        handlers.len()
    }

    /// Tear down every registration at `root` and below.
    ///
    /// Returns how many handlers were removed.
    pub fn remove_subtree(&mut self, root: &PathId) -> usize {
        let mut removed = 0;
        self.handlers.retain(|(_, path), handlers| {
            if path.within(root) {
                removed += handlers.len();
                false
            } else {
                true
            }
        });
        if removed > 0 {
            tracing::trace!("removed {} listener(s) under {}", removed, root);
        }
        removed
    }

    /// Number of handlers registered for `kind` at exactly `path`.
    pub fn handler_count(&self, kind: &str, path: &PathId) -> usize {
        let key = (SmartString::from(kind), path.clone());
        self.handlers.get(&key).map_or(0, |h| h.len())
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.values().map(|h| h.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the delegated event kind from a prop name.
///
/// Names of the form `on` + letter are event props: `onClick` -> `click`,
/// `onDoubleClick` -> `doubleclick`. Anything else is a plain attribute.
pub fn event_prop_kind(name: &str) -> Option<SmartString> {
    let rest = name.strip_prefix("on")?;
    let first = rest.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    Some(rest.to_ascii_lowercase().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_event_prop_kind_derivation() {
        assert_eq!(event_prop_kind("onClick").as_deref(), Some("click"));
        assert_eq!(
            event_prop_kind("onDoubleClick").as_deref(),
            Some("doubleclick")
        );
        assert_eq!(event_prop_kind("id"), None);
        assert_eq!(event_prop_kind("on"), None);
        assert_eq!(event_prop_kind("on1"), None);
    }

    #[test]
    fn test_dispatch_runs_registered_handlers() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();
        let path = PathId::new("0.1");

        let sink = hits.clone();
        registry.register(
            "click",
            path.clone(),
            EventHandler::new(move |event| {
                sink.borrow_mut().push(event.target.clone());
            }),
        );

        assert_eq!(registry.dispatch("click", &path), 1);
        assert_eq!(registry.dispatch("click", &PathId::new("0.2")), 0);
        assert_eq!(registry.dispatch("change", &path), 0);
        assert_eq!(hits.borrow().len(), 1);
        assert_eq!(hits.borrow()[0], path);
    }

    #[test]
    fn test_remove_subtree_is_prefix_scoped() {
        let mut registry = EventRegistry::new();
        let handler = EventHandler::new(|_| {});
        registry.register("click", PathId::new("0.1"), handler.clone());
        registry.register("click", PathId::new("0.1.2"), handler.clone());
        registry.register("click", PathId::new("0.10"), handler.clone());
        registry.register("change", PathId::new("0.1"), handler);

        let removed = registry.remove_subtree(&PathId::new("0.1"));
        assert_eq!(removed, 3);
        assert_eq!(registry.handler_count("click", &PathId::new("0.10")), 1);
        assert_eq!(registry.handler_count("click", &PathId::new("0.1")), 0);
        assert_eq!(registry.handler_count("change", &PathId::new("0.1")), 0);
    }

    #[test]
    fn test_registration_is_additive_per_key() {
        let mut registry = EventRegistry::new();
        let path = PathId::new("3");
        registry.register("click", path.clone(), EventHandler::new(|_| {}));
        registry.register("click", path.clone(), EventHandler::new(|_| {}));
        assert_eq!(registry.handler_count("click", &path), 2);
        assert_eq!(registry.len(), 2);
    }
}
