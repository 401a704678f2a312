/// An identity key for a syntax-tree node.
///
/// The binding result borrows the tree for its whole lifetime, so a node's
/// address is stable and unique while any key derived from it is usable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeKey(usize);

impl NodeKey {
    pub fn from_node<T>(node: &T) -> Self {
        Self(std::ptr::from_ref(node) as usize)
    }
}

/// Opaque handle identifying the expression (or statement) a later inference
/// pass should derive a binding's type from. The binder only mints and
/// forwards these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeSourceId(NodeKey);

impl TypeSourceId {
    pub fn from_node<T>(node: &T) -> Self {
        Self(NodeKey::from_node(node))
    }

    pub fn node_key(self) -> NodeKey {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::NodeKey;

    #[test]
    fn distinct_nodes_get_distinct_keys() {
        let a = 1u32;
        let b = 2u32;
        assert_ne!(NodeKey::from_node(&a), NodeKey::from_node(&b));
        assert_eq!(NodeKey::from_node(&a), NodeKey::from_node(&a));
    }
}
