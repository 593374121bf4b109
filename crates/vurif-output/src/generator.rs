use std::collections::HashSet;

use serde::Serialize;
use vurif_core::{ComponentRegistry, Node};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeDef {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeDef {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Flat graph record shared by the report, json and dot outputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GraphElement {
    Node(NodeDef),
    Edge(EdgeDef),
}

impl GraphElement {
    pub fn id(&self) -> &str {
        match self {
            GraphElement::Node(n) => &n.id,
            GraphElement::Edge(e) => &e.id,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeDef> {
        match self {
            GraphElement::Edge(e) => Some(e),
            GraphElement::Node(_) => None,
        }
    }

    pub fn is_edge(&self) -> bool {
        self.as_edge().is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CytoscapeData {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Element definition in the shape the cytoscape renderer reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CytoscapeElement {
    pub data: CytoscapeData,
}

pub fn edge_id(source: &str, target: &str) -> String {
    format!("{}-{}", source, target)
}

/// Element shape produced by a [`GraphGenerator`].
pub trait GraphStrategy {
    type Element: Serialize;

    fn node_def(&self, name: &str) -> Self::Element;
    fn edge_def(&self, source: &str, target: &str) -> Self::Element;
    fn id<'e>(&self, element: &'e Self::Element) -> &'e str;
}

pub struct ObjectStrategy;

impl GraphStrategy for ObjectStrategy {
    type Element = GraphElement;

    fn node_def(&self, name: &str) -> GraphElement {
        GraphElement::Node(NodeDef {
            id: name.to_string(),
            name: name.to_string(),
        })
    }

    fn edge_def(&self, source: &str, target: &str) -> GraphElement {
        GraphElement::Edge(EdgeDef {
            id: edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
        })
    }

    fn id<'e>(&self, element: &'e GraphElement) -> &'e str {
        element.id()
    }
}

pub struct CytoscapeStrategy;

impl GraphStrategy for CytoscapeStrategy {
    type Element = CytoscapeElement;

    fn node_def(&self, name: &str) -> CytoscapeElement {
        CytoscapeElement {
            data: CytoscapeData {
                id: name.to_string(),
                source: None,
                target: None,
            },
        }
    }

    fn edge_def(&self, source: &str, target: &str) -> CytoscapeElement {
        CytoscapeElement {
            data: CytoscapeData {
                id: edge_id(source, target),
                source: Some(source.to_string()),
                target: Some(target.to_string()),
            },
        }
    }

    fn id<'e>(&self, element: &'e CytoscapeElement) -> &'e str {
        &element.data.id
    }
}

/// Ids of the elements already emitted during one generation run.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    resolved: HashSet<String>,
}

impl ResolutionCache {
    pub fn already_resolved(&self, id: &str) -> bool {
        self.resolved.contains(id)
    }

    /// Returns false when `id` was resolved before.
    pub fn mark_as_resolved(&mut self, id: &str) -> bool {
        self.resolved.insert(id.to_string())
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Flattens node trees into deduplicated node and edge elements. Labels are
/// the registry paths of the components.
pub struct GraphGenerator<'a, S> {
    registry: &'a ComponentRegistry,
    strategy: S,
}

impl<'a, S: GraphStrategy> GraphGenerator<'a, S> {
    pub fn new(registry: &'a ComponentRegistry, strategy: S) -> Self {
        Self { registry, strategy }
    }

    pub fn generate(&self, node: &Node) -> Vec<S::Element> {
        let mut cache = ResolutionCache::default();
        self.generate_with(node, &mut cache)
    }

    /// Generate every root against one cache, so components shared between
    /// roots are emitted once.
    pub fn generate_all(&self, nodes: &[Node]) -> Vec<S::Element> {
        let mut cache = ResolutionCache::default();
        nodes
            .iter()
            .flat_map(|node| self.generate_with(node, &mut cache))
            .collect()
    }

    pub fn generate_with(&self, node: &Node, cache: &mut ResolutionCache) -> Vec<S::Element> {
        let mut elements = Vec::new();
        self.push_node(node, cache, &mut elements);
        elements
    }

    fn push_node(&self, node: &Node, cache: &mut ResolutionCache, out: &mut Vec<S::Element>) {
        let label = self.label(node);
        let node_def = self.strategy.node_def(label);
        if !cache.mark_as_resolved(self.strategy.id(&node_def)) {
            return;
        }
        for child in node.edges().values() {
            let edge_def = self.strategy.edge_def(label, self.label(child));
            if cache.mark_as_resolved(self.strategy.id(&edge_def)) {
                out.push(edge_def);
            }
            self.push_node(child, cache, out);
        }
        out.push(node_def);
    }

    fn label<'n>(&self, node: &'n Node) -> &'n str
    where
        'a: 'n,
    {
        self.registry.get(node.name()).unwrap_or(node.name())
    }
}
