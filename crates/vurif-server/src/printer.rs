use std::io::Write;

use vfs::VfsPath;
use vurif_core::{ComponentRegistry, Node};
use vurif_output::{CytoscapeElement, CytoscapeStrategy, GraphGenerator, Printer};

pub const DATA_FILE: &str = "data.json";

/// Write cytoscape elements to `<out_dir>/data.json`, creating the
/// directory when needed.
pub fn write_elements(out_dir: &VfsPath, elements: &[CytoscapeElement]) -> anyhow::Result<VfsPath> {
    out_dir.create_dir_all()?;
    let path = out_dir.join(DATA_FILE)?;
    let mut file = path.create_file()?;
    file.write_all(serde_json::to_string(elements)?.as_bytes())?;
    Ok(path)
}

/// Prepares the graph data the preview server hands to the browser.
pub struct VisualGraphPrinter<'a> {
    generator: GraphGenerator<'a, CytoscapeStrategy>,
    out_dir: VfsPath,
}

impl<'a> VisualGraphPrinter<'a> {
    pub fn new(registry: &'a ComponentRegistry, out_dir: VfsPath) -> Self {
        Self {
            generator: GraphGenerator::new(registry, CytoscapeStrategy),
            out_dir,
        }
    }

    fn write(&self, elements: &[CytoscapeElement], out: &mut dyn Write) -> anyhow::Result<()> {
        let path = write_elements(&self.out_dir, elements)?;
        writeln!(
            out,
            "Wrote {} graph elements to {}",
            elements.len(),
            path.as_str()
        )?;
        Ok(())
    }
}

impl Printer for VisualGraphPrinter<'_> {
    fn print(&self, node: &Node, out: &mut dyn Write) -> anyhow::Result<()> {
        self.write(&self.generator.generate(node), out)
    }

    fn print_all(&self, nodes: &[Node], out: &mut dyn Write) -> anyhow::Result<()> {
        self.write(&self.generator.generate_all(nodes), out)
    }
}
