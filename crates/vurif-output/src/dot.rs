use std::collections::HashMap;
use std::io::Write;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use vurif_core::{ComponentRegistry, Node};

use crate::Printer;
use crate::generator::{GraphElement, GraphGenerator, ObjectStrategy};

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn index_of<'e>(
    graph: &mut DiGraph<String, ()>,
    indices: &mut HashMap<&'e str, NodeIndex>,
    name: &'e str,
) -> NodeIndex {
    *indices
        .entry(name)
        .or_insert_with(|| graph.add_node(name.to_string()))
}

/// Build a petgraph graph from deduplicated elements.
pub fn elements_to_graph(elements: &[GraphElement]) -> DiGraph<String, ()> {
    let mut graph = DiGraph::new();
    let mut indices = HashMap::new();
    // node-defs trail their edges; index them first
    for element in elements {
        if let GraphElement::Node(node) = element {
            index_of(&mut graph, &mut indices, &node.id);
        }
    }
    for element in elements {
        if let GraphElement::Edge(edge) = element {
            let source = index_of(&mut graph, &mut indices, &edge.source);
            let target = index_of(&mut graph, &mut indices, &edge.target);
            graph.add_edge(source, target, ());
        }
    }
    graph
}

/// Convert a component graph to Graphviz dot format.
pub fn graph_to_dot(graph: &DiGraph<String, ()>) -> String {
    let mut out = String::from("digraph {\n");
    for i in graph.node_indices() {
        out.push_str(&format!(
            "    {} [label=\"{}\", shape=box]\n",
            i.index(),
            escape_label(&graph[i])
        ));
    }
    for e in graph.edge_references() {
        out.push_str(&format!(
            "    {} -> {}\n",
            e.source().index(),
            e.target().index()
        ));
    }
    out.push_str("}\n");
    out
}

pub struct DotPrinter<'a> {
    generator: GraphGenerator<'a, ObjectStrategy>,
}

impl<'a> DotPrinter<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            generator: GraphGenerator::new(registry, ObjectStrategy),
        }
    }
}

impl Printer for DotPrinter<'_> {
    fn print(&self, node: &Node, out: &mut dyn Write) -> anyhow::Result<()> {
        let graph = elements_to_graph(&self.generator.generate(node));
        write!(out, "{}", graph_to_dot(&graph))?;
        Ok(())
    }

    fn print_all(&self, nodes: &[Node], out: &mut dyn Write) -> anyhow::Result<()> {
        let graph = elements_to_graph(&self.generator.generate_all(nodes));
        write!(out, "{}", graph_to_dot(&graph))?;
        Ok(())
    }
}
