use crate::element::Node;
use crate::error::{RenderError, Result};
use crate::path::PathId;
use smartstring::alias::String as SmartString;

/// Leaf renderer for primitive values.
///
/// Mounts once to a `<span>` wrapping the stringified value. There is no
/// update path: a text position that needs different content is replaced
/// wholesale by the owning ancestor.
#[derive(Debug)]
pub struct TextRenderer {
    node: Node,
    text: SmartString,
    path: Option<PathId>,
}

impl TextRenderer {
    pub(crate) fn new(node: Node) -> Self {
        // classification hands this constructor primitives only
        let text = node.primitive_text().unwrap_or_default();
        Self {
            node,
            text,
            path: None,
        }
    }

    pub fn mount(&mut self, path: PathId) -> Result<String> {
        tracing::trace!("mounting text at {}", path);
        let markup = format!("<span data-reactid=\"{}\">{}</span>", path, self.text);
        self.path = Some(path);
        Ok(markup)
    }

    /// Record a new descriptor without touching mounted markup.
    ///
    /// Reused primitives keep their mounted content; only an ancestor
    /// replacement changes what is on screen.
    pub(crate) fn receive(&mut self, next: Option<Node>) -> Result<()> {
        let Some(node) = next else {
            return Ok(());
        };
        if !node.is_primitive() {
            return Err(RenderError::InvalidElementNode {
                found: node.shape_name().to_string(),
            });
        }
        tracing::trace!("text at {:?} recorded new descriptor", self.path);
        self.node = node;
        Ok(())
    }

    pub fn path(&self) -> Option<&PathId> {
        self.path.as_ref()
    }

    /// The mounted text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn current_node(&self) -> Node {
        self.node.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_wraps_value_with_quoted_path() {
        let mut text = TextRenderer::new(Node::Str("hi".into()));
        let markup = text.mount(PathId::new("0.0")).unwrap();
        assert_eq!(markup, "<span data-reactid=\"0.0\">hi</span>");
        assert_eq!(text.path(), Some(&PathId::new("0.0")));
    }

    #[test]
    fn test_numbers_stringify() {
        let mut text = TextRenderer::new(Node::Int(42));
        assert_eq!(
            text.mount(PathId::new("1")).unwrap(),
            "<span data-reactid=\"1\">42</span>"
        );
    }

    #[test]
    fn test_receive_records_without_remount() {
        let mut text = TextRenderer::new(Node::Str("a".into()));
        text.mount(PathId::new("0")).unwrap();

        text.receive(Some(Node::Str("b".into()))).unwrap();
        // mounted content is untouched
        assert_eq!(text.text(), "a");
        assert!(matches!(text.current_node(), Node::Str(s) if s == "b"));
    }

    #[test]
    fn test_receive_rejects_structured_nodes() {
        let mut text = TextRenderer::new(Node::Str("a".into()));
        text.mount(PathId::new("0")).unwrap();
        assert!(text.receive(Some(Node::Null)).is_err());
    }
}
