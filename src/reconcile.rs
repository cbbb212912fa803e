use crate::element::Node;

/// Decide whether a mounted subtree can absorb `next` in place.
///
/// Primitives are reusable against any other primitive; value equality is
/// deliberately not compared, so a reused text position keeps its mounted
/// content. Structured nodes are reusable only when kind and key both
/// match. Everything else is replaced wholesale.
pub fn should_reuse(prev: Option<&Node>, next: Option<&Node>) -> bool {
    let (Some(prev), Some(next)) = (prev, next) else {
        return false;
    };
    if prev.is_primitive() {
        return next.is_primitive();
    }
    match (prev, next) {
        (Node::Element(prev), Node::Element(next)) => {
            prev.kind.same_kind(&next.kind) && prev.key == next.key
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, StateMap};
    use crate::element::{ComponentKind, Element, Props, create_element};
    use crate::error::Result;

    struct Dummy;

    impl Component for Dummy {
        fn render(&self, _props: &Props, _state: &StateMap) -> Result<Node> {
            Ok(Node::Null)
        }
    }

    fn kind() -> ComponentKind {
        ComponentKind::new("Dummy", |_| Box::new(Dummy))
    }

    fn div() -> Node {
        Node::Element(create_element("div", Props::new(), ()))
    }

    fn span() -> Node {
        Node::Element(create_element("span", Props::new(), ()))
    }

    #[test]
    fn test_absent_sides_never_reuse() {
        assert!(!should_reuse(None, None));
        assert!(!should_reuse(Some(&div()), None));
        assert!(!should_reuse(None, Some(&div())));
    }

    #[test]
    fn test_primitives_reuse_regardless_of_value() {
        assert!(should_reuse(
            Some(&Node::Str("a".into())),
            Some(&Node::Str("b".into()))
        ));
        assert!(should_reuse(Some(&Node::Int(1)), Some(&Node::Str("x".into()))));
        assert!(!should_reuse(Some(&Node::Str("a".into())), Some(&div())));
    }

    #[test]
    fn test_hosts_reuse_on_matching_tag_and_key() {
        assert!(should_reuse(Some(&div()), Some(&div())));
        assert!(!should_reuse(Some(&div()), Some(&span())));

        let keyed_a = Node::Element(Element::new("div", Props::new()).with_key("a"));
        let keyed_b = Node::Element(Element::new("div", Props::new()).with_key("b"));
        assert!(!should_reuse(Some(&keyed_a), Some(&keyed_b)));
        assert!(should_reuse(Some(&keyed_a), Some(&keyed_a.clone())));
    }

    #[test]
    fn test_composites_reuse_on_constructor_identity() {
        let shared = kind();
        let prev = Node::Element(create_element(shared.clone(), Props::new(), ()));
        let next = Node::Element(create_element(shared, Props::new(), ()));
        assert!(should_reuse(Some(&prev), Some(&next)));

        // same name, different constructor: not the same kind
        let other = Node::Element(create_element(kind(), Props::new(), ()));
        assert!(!should_reuse(Some(&prev), Some(&other)));
    }

    #[test]
    fn test_structured_never_reuses_against_unrenderable() {
        assert!(!should_reuse(Some(&div()), Some(&Node::Null)));
        assert!(!should_reuse(Some(&Node::Null), Some(&div())));
        assert!(!should_reuse(Some(&Node::Bool(true)), Some(&Node::Bool(true))));
    }
}
