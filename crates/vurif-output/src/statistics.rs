use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use vurif_core::{ComponentRegistry, Node};

use crate::Printer;
use crate::generator::{GraphElement, GraphGenerator, ObjectStrategy};

const MARGIN_LEFT: &str = "  ";

const HEADER_ROW_NUM: &str = " # ";
const HEADER_NAME: &str = " name ";
const HEADER_INDEGREE: &str = " indegree ";
const HEADER_OUTDEGREE: &str = " outdegree ";

/// Degrees of one component on the graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComponentStatistics {
    pub name: String,
    pub indegree: usize,
    pub outdegree: usize,
}

/// Count in/out edges per label. Labels without any edge are left out.
pub fn create_component_statistics(elements: &[GraphElement]) -> Vec<ComponentStatistics> {
    let mut degrees: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for edge in elements.iter().filter_map(GraphElement::as_edge) {
        degrees.entry(&edge.target).or_default().0 += 1;
        degrees.entry(&edge.source).or_default().1 += 1;
    }
    degrees
        .into_iter()
        .map(|(name, (indegree, outdegree))| ComponentStatistics {
            name: name.to_string(),
            indegree,
            outdegree,
        })
        .collect()
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

/// Bordered degree table, ordered by indegree.
pub struct StatisticsReportFormatter {
    statistics: Vec<ComponentStatistics>,
    name_width: usize,
}

impl StatisticsReportFormatter {
    pub fn new(mut statistics: Vec<ComponentStatistics>) -> Self {
        statistics.sort_by(|l, r| r.indegree.cmp(&l.indegree));
        let longest = statistics
            .iter()
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or(0);
        let name_width = (longest + 2).max(HEADER_NAME.len());
        Self {
            statistics,
            name_width,
        }
    }

    fn row(&self, num: &str, name: &str, indegree: &str, outdegree: &str) -> String {
        [
            "".to_string(),
            pad(num, HEADER_ROW_NUM.len(), Align::Left),
            pad(name, self.name_width, Align::Left),
            pad(indegree, HEADER_INDEGREE.len(), Align::Right),
            pad(outdegree, HEADER_OUTDEGREE.len(), Align::Right),
            "".to_string(),
        ]
        .join("|")
    }

    fn border(&self) -> String {
        "-".repeat(self.header().len())
    }

    fn header(&self) -> String {
        self.row(HEADER_ROW_NUM, HEADER_NAME, HEADER_INDEGREE, HEADER_OUTDEGREE)
    }

    /// Width of the indented table.
    pub fn width(&self) -> usize {
        MARGIN_LEFT.len() + self.border().len()
    }

    pub fn format(&self) -> String {
        let border = self.border();
        let mut records = vec![String::new(), border.clone(), self.header(), border.clone()];
        for (i, stat) in self.statistics.iter().enumerate() {
            records.push(self.row(
                &(i + 1).to_string(),
                &stat.name,
                &stat.indegree.to_string(),
                &stat.outdegree.to_string(),
            ));
        }
        records.push(border);
        records.push(String::new());
        records
            .iter()
            .map(|r| format!("{}{}", MARGIN_LEFT, r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn format_summary(elements: &[GraphElement]) -> String {
    let edges = elements.iter().filter(|e| e.is_edge()).count();
    let nodes = elements.len() - edges;
    [
        format!("🔸 Total nodes: {}", nodes),
        format!("➣  Total edges: {}", edges),
    ]
    .iter()
    .map(|t| format!("{}{}", MARGIN_LEFT, t))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Full text of the degree report for a set of elements.
pub fn format_report(elements: &[GraphElement]) -> String {
    let formatter = StatisticsReportFormatter::new(create_component_statistics(elements));
    [
        "Node degrees:".to_string(),
        formatter.format(),
        "-".repeat(formatter.width()),
        "Summary: ".to_string(),
        String::new(),
        format_summary(elements),
        String::new(),
    ]
    .join("\n")
}

pub struct StatisticsReportPrinter<'a> {
    generator: GraphGenerator<'a, ObjectStrategy>,
}

impl<'a> StatisticsReportPrinter<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            generator: GraphGenerator::new(registry, ObjectStrategy),
        }
    }
}

impl Printer for StatisticsReportPrinter<'_> {
    fn print(&self, node: &Node, out: &mut dyn Write) -> anyhow::Result<()> {
        write!(out, "{}", format_report(&self.generator.generate(node)))?;
        Ok(())
    }

    fn print_all(&self, nodes: &[Node], out: &mut dyn Write) -> anyhow::Result<()> {
        write!(out, "{}", format_report(&self.generator.generate_all(nodes)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{EdgeDef, NodeDef};

    fn node(id: &str) -> GraphElement {
        GraphElement::Node(NodeDef {
            id: id.into(),
            name: id.into(),
        })
    }

    fn edge(source: &str, target: &str) -> GraphElement {
        GraphElement::Edge(EdgeDef {
            id: format!("{source}-{target}"),
            source: source.into(),
            target: target.into(),
        })
    }

    fn find<'s>(stats: &'s [ComponentStatistics], name: &str) -> &'s ComponentStatistics {
        stats.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn test_single_node_has_no_statistics() {
        assert!(create_component_statistics(&[node("App.vue")]).is_empty());
    }

    #[test]
    fn test_single_edge() {
        let stats = create_component_statistics(&[
            node("App.vue"),
            node("Button.vue"),
            edge("App.vue", "Button.vue"),
        ]);
        assert_eq!(stats.len(), 2);
        let button = find(&stats, "Button.vue");
        assert_eq!((button.indegree, button.outdegree), (1, 0));
        let app = find(&stats, "App.vue");
        assert_eq!((app.indegree, app.outdegree), (0, 1));
    }

    #[test]
    fn test_node_depended_on_by_others() {
        let stats = create_component_statistics(&[
            node("App.vue"),
            node("Button.vue"),
            node("About.vue"),
            node("Lonely.vue"),
            edge("App.vue", "Button.vue"),
            edge("About.vue", "Button.vue"),
        ]);
        assert_eq!(stats.len(), 3);
        assert_eq!(find(&stats, "Button.vue").indegree, 2);
        assert_eq!(find(&stats, "App.vue").outdegree, 1);
        assert_eq!(find(&stats, "About.vue").outdegree, 1);
        assert!(stats.iter().all(|s| s.name != "Lonely.vue"));
    }

    #[test]
    fn test_node_with_edges_and_dependents() {
        let stats = create_component_statistics(&[
            edge("App.vue", "TodoList.vue"),
            edge("App.vue", "TodoItem.vue"),
            edge("TodoList.vue", "TodoItem.vue"),
            edge("TodoItem.vue", "Button.vue"),
        ]);
        let item = find(&stats, "TodoItem.vue");
        assert_eq!((item.indegree, item.outdegree), (2, 1));
        let list = find(&stats, "TodoList.vue");
        assert_eq!((list.indegree, list.outdegree), (1, 1));
        assert_eq!(find(&stats, "Button.vue").indegree, 1);
        assert_eq!(find(&stats, "App.vue").outdegree, 2);
    }

    #[test]
    fn test_report_layout() {
        let report = format_report(&[
            edge("App.vue", "Button.vue"),
            node("Button.vue"),
            edge("About.vue", "Button.vue"),
            node("App.vue"),
            node("About.vue"),
        ]);
        let expected = [
            "Node degrees:",
            "  ",
            "  -----------------------------------------",
            "  | # | name       | indegree | outdegree |",
            "  -----------------------------------------",
            "  |1  |Button.vue  |         2|          0|",
            "  |2  |About.vue   |         0|          1|",
            "  |3  |App.vue     |         0|          1|",
            "  -----------------------------------------",
            "  ",
            "-------------------------------------------",
            "Summary: ",
            "",
            "  🔸 Total nodes: 3",
            "  ➣  Total edges: 2",
            "",
        ]
        .join("\n");
        assert_eq!(report, expected);
    }

    #[test]
    fn test_empty_report() {
        let report = format_report(&[]);
        assert!(report.starts_with("Node degrees:\n"));
        assert!(report.contains("  | # | name | indegree | outdegree |"));
        assert!(report.contains("🔸 Total nodes: 0"));
    }

    #[test]
    fn test_printer_writes_report() {
        let registry = ComponentRegistry::from_entries([
            ("App", "components/App.vue"),
            ("pages/index.vue", "pages/index.vue"),
        ]);
        let root = Node::with_edges("pages/index.vue", [Node::new("App")]);
        let mut out = Vec::new();
        StatisticsReportPrinter::new(&registry)
            .print(&root, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("|1  |components/App.vue  |         1|          0|"));
        assert!(text.contains("|2  |pages/index.vue     |         0|          1|"));
        assert!(text.contains("Total edges: 1"));
    }
}
