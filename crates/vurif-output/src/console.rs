use std::io::Write;

use vurif_core::{ComponentRegistry, Node};

use crate::Printer;

const BRANCH: &str = "└── ";

/// Indented tree of registry paths.
pub struct ConsolePrinter<'a> {
    registry: &'a ComponentRegistry,
}

impl<'a> ConsolePrinter<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry }
    }

    pub fn create_lines(&self, node: &Node) -> Vec<String> {
        let mut lines = Vec::new();
        self.push_lines(node, 0, &mut lines);
        lines
    }

    fn push_lines(&self, node: &Node, depth: usize, lines: &mut Vec<String>) {
        let path = self.registry.get(node.name()).unwrap_or(node.name());
        if depth == 0 {
            lines.push(path.to_string());
        } else {
            lines.push(format!("{}{}{}", "  ".repeat(depth), BRANCH, path));
        }
        for child in node.edges().values() {
            self.push_lines(child, depth + 1, lines);
        }
    }
}

impl Printer for ConsolePrinter<'_> {
    fn print(&self, node: &Node, out: &mut dyn Write) -> anyhow::Result<()> {
        for line in self.create_lines(node) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn print_all(&self, nodes: &[Node], out: &mut dyn Write) -> anyhow::Result<()> {
        for node in nodes {
            self.print(node, out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_padding() {
        let registry = ComponentRegistry::from_entries([("pages/index.vue", "pages/index.vue")]);
        let lines = ConsolePrinter::new(&registry).create_lines(&Node::new("pages/index.vue"));
        assert_eq!(lines, vec!["pages/index.vue"]);
    }

    #[test]
    fn test_depth_two() {
        let registry = ComponentRegistry::from_entries([
            ("pages/index.vue", "pages/index.vue"),
            ("App", "components/App.vue"),
        ]);
        let root = Node::with_edges("pages/index.vue", [Node::new("App")]);
        let lines = ConsolePrinter::new(&registry).create_lines(&root);
        assert_eq!(lines, vec!["pages/index.vue", "  └── components/App.vue"]);
    }

    #[test]
    fn test_nested_lines() {
        let registry = ComponentRegistry::from_entries([
            ("pages/index.vue", "pages/index.vue"),
            ("App", "components/App.vue"),
            ("Button", "components/Button.vue"),
            ("Header", "components/Header.vue"),
            ("Message", "components/Message.vue"),
        ]);
        let root = Node::with_edges(
            "pages/index.vue",
            [Node::with_edges(
                "App",
                [
                    Node::with_edges("Header", [Node::new("Button")]),
                    Node::new("Message"),
                ],
            )],
        );
        let lines = ConsolePrinter::new(&registry).create_lines(&root);
        assert_eq!(
            lines,
            vec![
                "pages/index.vue",
                "  └── components/App.vue",
                "    └── components/Header.vue",
                "      └── components/Button.vue",
                "    └── components/Message.vue",
            ]
        );
    }

    #[test]
    fn test_print_all_writes_each_tree() {
        let registry = ComponentRegistry::from_entries([
            ("pages/index.vue", "pages/index.vue"),
            ("pages/about.vue", "pages/about.vue"),
            ("App", "components/App.vue"),
        ]);
        let roots = [
            Node::with_edges("pages/about.vue", [Node::new("App")]),
            Node::new("pages/index.vue"),
        ];
        let mut out = Vec::new();
        ConsolePrinter::new(&registry)
            .print_all(&roots, &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "pages/about.vue\n  └── components/App.vue\npages/index.vue\n"
        );
    }
}
