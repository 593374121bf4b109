pub mod console;
pub mod dot;
pub mod generator;
pub mod json;
pub mod statistics;

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use vurif_core::Node;

pub use console::ConsolePrinter;
pub use dot::{DotPrinter, elements_to_graph, graph_to_dot};
pub use generator::{
    CytoscapeElement, CytoscapeStrategy, EdgeDef, GraphElement, GraphGenerator, GraphStrategy,
    NodeDef, ObjectStrategy, ResolutionCache, edge_id,
};
pub use json::{JsonPrinter, elements_to_json};
pub use statistics::{
    ComponentStatistics, StatisticsReportFormatter, StatisticsReportPrinter,
    create_component_statistics, format_report,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Interactive graph served on a local port
    #[default]
    Graph,
    /// Indented tree on stdout
    Stdout,
    /// In/out degree table
    Report,
    Json,
    Dot,
}

impl OutputFormat {
    /// Formats written to a file rather than the terminal.
    pub fn default_output(self) -> Option<&'static str> {
        match self {
            OutputFormat::Json => Some("vurif.json"),
            OutputFormat::Dot => Some("vurif.dot"),
            OutputFormat::Graph | OutputFormat::Stdout | OutputFormat::Report => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormat::Graph => "graph",
            OutputFormat::Stdout => "stdout",
            OutputFormat::Report => "report",
            OutputFormat::Json => "json",
            OutputFormat::Dot => "dot",
        };
        write!(f, "{}", s)
    }
}

/// Writes the dependency graph of one root, or of several roots sharing
/// their resolved components.
pub trait Printer {
    fn print(&self, node: &Node, out: &mut dyn Write) -> anyhow::Result<()>;
    fn print_all(&self, nodes: &[Node], out: &mut dyn Write) -> anyhow::Result<()>;
}
