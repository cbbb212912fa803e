//! # skiff_ui
//!
//! Minimal component-based markup rendering engine.
//!
//! A declarative [`Node`] tree is classified once into three renderer
//! variants (text, host, composite), mounted into path-tagged markup, and
//! kept in sync as component props and state change: every update either
//! reuses the mounted subtree in place or discards it and rebuilds it
//! wholesale. [`App`] is the entry point that owns the document sink, the
//! event registry and the root path allocator.

pub mod app;
pub mod component;
pub mod dom;
pub mod element;
pub mod error;
pub mod events;
pub mod path;
pub mod reconcile;
pub mod render;

pub use app::App;
pub use component::{Component, StateMap};
pub use dom::{DocumentSink, MemoryDocument};
pub use element::{
    CHILDREN, Children, ComponentKind, Element, ElementKind, Node, PropValue, Props,
    create_element,
};
pub use error::{RenderError, Result};
pub use events::{Event, EventHandler, EventRegistry, event_prop_kind};
pub use path::{PathId, RootAllocator};
pub use reconcile::should_reuse;
pub use render::{
    CompositeRenderer, HostRenderer, RendererInstance, TextRenderer, TreeCtx, instantiate,
};
