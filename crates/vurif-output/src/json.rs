use std::io::Write;

use vurif_core::{ComponentRegistry, Node};

use crate::Printer;
use crate::generator::{GraphElement, GraphGenerator, ObjectStrategy};

/// Render graph elements as a pretty JSON array.
pub fn elements_to_json(elements: &[GraphElement]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(elements)?)
}

pub struct JsonPrinter<'a> {
    generator: GraphGenerator<'a, ObjectStrategy>,
}

impl<'a> JsonPrinter<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            generator: GraphGenerator::new(registry, ObjectStrategy),
        }
    }
}

impl Printer for JsonPrinter<'_> {
    fn print(&self, node: &Node, out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "{}", elements_to_json(&self.generator.generate(node))?)?;
        Ok(())
    }

    fn print_all(&self, nodes: &[Node], out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "{}", elements_to_json(&self.generator.generate_all(nodes))?)?;
        Ok(())
    }
}
