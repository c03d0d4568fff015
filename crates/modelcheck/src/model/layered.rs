use std::sync::Arc;

use indexmap::IndexMap;

/// A map inherited by reference and copied on the first write.
///
/// Every layer holds the fully resolved entries of its ancestors, so lookups
/// and iteration never walk a parent chain. Deriving shares the current
/// entries behind an `Arc`; whichever side writes first gets its own copy,
/// so nothing a child does is visible to its parent or siblings.
///
/// Iteration order is inherited keys in the parent's order, then keys new to
/// this layer. A shadowed key keeps its inherited position.
#[derive(Clone)]
pub(crate) struct Layered<V> {
    entries: Arc<IndexMap<String, V>>,
    depth: usize,
}

impl<V: Clone> Layered<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(IndexMap::new()),
            depth: 1,
        }
    }

    /// Empty layer on top of `self`.
    pub fn derive(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            depth: self.depth + 1,
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    #[cfg(test)]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        Arc::make_mut(&mut self.entries).insert(key.into(), value);
    }

    /// Effective keys in inheritance order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of layers, this one included.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<V: Clone> FromIterator<(String, V)> for Layered<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self {
            entries: Arc::new(iter.into_iter().collect()),
            depth: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::Layered;

    fn base() -> Layered<u32> {
        [("a".to_string(), 1), ("b".to_string(), 2)]
            .into_iter()
            .collect()
    }

    #[test]
    fn child_reads_fall_back_to_parent() {
        let child = base().derive();
        assert_eq!(child.get("a"), Some(&1));
        assert_eq!(child.get("b"), Some(&2));
        assert_eq!(child.get("c"), None);
        assert_eq!(child.depth(), 2);
    }

    #[test]
    fn child_writes_shadow_without_touching_parent() {
        let parent = base();
        let mut child = parent.derive();
        child.insert("a", 10);
        child.insert("c", 3);

        assert_eq!(child.get("a"), Some(&10));
        assert_eq!(child.get("c"), Some(&3));
        assert_eq!(parent.get("a"), Some(&1));
        assert!(!parent.contains_key("c"));
    }

    #[test]
    fn parent_writes_after_derive_stay_out_of_child() {
        let mut parent = base();
        let child = parent.derive();
        parent.insert("z", 26);
        assert!(!child.contains_key("z"));
        assert!(parent.contains_key("z"));
    }

    #[test]
    fn derive_shares_entries_until_first_write() {
        let parent = base();
        let mut child = parent.derive();
        let grandchild = child.derive();
        assert!(Arc::ptr_eq(&parent.entries, &child.entries));
        assert!(Arc::ptr_eq(&child.entries, &grandchild.entries));

        child.insert("c", 3);
        assert!(!Arc::ptr_eq(&parent.entries, &child.entries));
        assert!(Arc::ptr_eq(&parent.entries, &grandchild.entries));
        assert_eq!(grandchild.len(), 2);
    }

    #[test]
    fn keys_list_inherited_then_new() {
        let mut child = base().derive();
        child.insert("c", 3);
        child.insert("a", 10);
        let mut grandchild = child.derive();
        grandchild.insert("d", 4);

        assert_eq!(grandchild.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(grandchild.len(), 4);
        assert_eq!(grandchild.depth(), 3);
    }
}
