use std::collections::BTreeMap;

/// Registry key of a component: the file path itself for root nodes, or the
/// file-name-derived identifier for components found in the components
/// directory.
pub type ComponentKey = String;

pub type Edges = BTreeMap<ComponentKey, Node>;

/// A vertex of the dependency tree. Children are owned exclusively by their
/// parent, so a component referenced from two places appears as two nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    name: ComponentKey,
    edges: Edges,
}

impl Node {
    pub fn new(name: impl Into<ComponentKey>) -> Self {
        Self {
            name: name.into(),
            edges: Edges::new(),
        }
    }

    pub fn with_edges<I>(name: impl Into<ComponentKey>, edges: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let mut node = Self::new(name);
        node.add_edges(edges);
        node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edges(&self) -> &Edges {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Edges {
        &mut self.edges
    }

    pub fn edge(&self, name: &str) -> Option<&Node> {
        self.edges.get(name)
    }

    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    /// Merge children into this node's edges. An existing edge is kept as-is
    /// so a partially expanded child is never replaced by a bare one.
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = Node>,
    {
        for child in edges {
            self.edges.entry(child.name.clone()).or_insert(child);
        }
    }
}
