use smartstring::alias::String as SmartString;
use std::fmt;

/// Hierarchical identifier for a node's position in a mounted tree.
///
/// Root positions are plain numbers (`"0"`, `"1"`); the child at index `i`
/// of a node at `p` sits at `p.i`. Path ids are unique within one mounted
/// tree and stable for the lifetime of a renderer instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathId(SmartString);

impl PathId {
    pub fn new(id: impl Into<SmartString>) -> Self {
        Self(id.into())
    }

    /// Path id of the child at `index` under this node.
    pub fn child(&self, index: usize) -> PathId {
        PathId(format!("{}.{}", self.0, index).into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this path is `ancestor` itself or sits below it.
    ///
    /// Matches on the dotted segment boundary, so `"0.10"` is not within
    /// `"0.1"`.
    pub fn within(&self, ancestor: &PathId) -> bool {
        let own = self.as_str();
        let anc = ancestor.as_str();
        own == anc
            || (own.len() > anc.len()
                && own.starts_with(anc)
                && own.as_bytes()[anc.len()] == b'.')
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues unique, monotonically increasing root path ids.
///
/// Owned by the [`crate::App`] that performs top-level mounts; never shared
/// globally.
#[derive(Debug)]
pub struct RootAllocator {
    next: u64,
}

impl RootAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Take the next unused root path id.
    pub fn get(&mut self) -> PathId {
        let id = self.next;
        self.next += 1;
        PathId::new(id.to_string())
    }
}

impl Default for RootAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_paths_are_dotted() {
        let root = PathId::new("0");
        assert_eq!(root.child(0).as_str(), "0.0");
        assert_eq!(root.child(2).child(1).as_str(), "0.2.1");
    }

    #[test]
    fn test_within_matches_self_and_descendants() {
        let root = PathId::new("0.1");
        assert!(root.within(&root));
        assert!(root.child(0).within(&root));
        assert!(root.child(3).child(7).within(&root));
        assert!(!PathId::new("0").within(&root));
        assert!(!PathId::new("1.1").within(&root));
    }

    #[test]
    fn test_within_respects_segment_boundaries() {
        // "0.10" shares a string prefix with "0.1" but is a sibling
        assert!(!PathId::new("0.10").within(&PathId::new("0.1")));
        assert!(PathId::new("0.1.0").within(&PathId::new("0.1")));
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut roots = RootAllocator::new();
        assert_eq!(roots.get().as_str(), "0");
        assert_eq!(roots.get().as_str(), "1");
        assert_eq!(roots.get().as_str(), "2");
    }
}
