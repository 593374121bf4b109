use anyhow::Context;
use vfs::VfsPath;

use vurif_core::tags::{is_builtin_component, is_native_tag};
use vurif_core::{
    ComponentRegistry, Element, LogLevel, Logger, Node, TemplateParser, normalize_path,
    to_kebab_case, to_upper_camel_case,
};

/// Expands a node into its component dependency tree by reading each
/// component's template and resolving the tags it uses.
pub struct GraphLoader<'a> {
    root: &'a VfsPath,
    registry: &'a ComponentRegistry,
    parser: &'a dyn TemplateParser,
    logger: &'a dyn Logger,
}

impl<'a> GraphLoader<'a> {
    pub fn new(
        root: &'a VfsPath,
        registry: &'a ComponentRegistry,
        parser: &'a dyn TemplateParser,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            root,
            registry,
            parser,
            logger,
        }
    }

    /// Load `node` and, recursively, every component it references.
    ///
    /// An unresolvable node is left without edges. A child whose file is
    /// already being expanded further up the chain is attached but not
    /// descended into.
    pub fn load(&self, node: &mut Node) -> anyhow::Result<()> {
        let mut active = Vec::new();
        self.load_node(node, &mut active)
    }

    fn load_node(&self, node: &mut Node, active: &mut Vec<&'a str>) -> anyhow::Result<()> {
        let Some(file_path) = self.resolve(node.name()) else {
            self.logger.log(
                LogLevel::Warn,
                &format!("{} does not found in directory", node.name()),
            );
            return Ok(());
        };
        let Some(tags) = self.collect_tags(file_path)? else {
            return Ok(());
        };

        let children: Vec<Node> = tags
            .iter()
            .filter_map(|tag| self.resolve_tag(tag))
            .map(|(key, _)| Node::new(key))
            .collect();
        if children.is_empty() {
            return Ok(());
        }
        node.add_edges(children);

        active.push(file_path);
        for child in node.edges_mut().values_mut() {
            if let Some(child_path) = self.resolve(child.name())
                && active.contains(&child_path)
            {
                self.logger.log(
                    LogLevel::Warn,
                    &format!("cycle detected: {} -> {}", file_path, child_path),
                );
                continue;
            }
            self.load_node(child, active)?;
        }
        active.pop();
        Ok(())
    }

    /// File path of a node: its exact registry key first, then the tag
    /// spellings.
    fn resolve(&self, name: &str) -> Option<&'a str> {
        self.registry
            .get(name)
            .or_else(|| self.search_file_path(name))
    }

    /// Resolve a tag found in markup, ignoring native elements and
    /// framework builtins.
    fn resolve_tag(&self, tag: &str) -> Option<(&'a str, &'a str)> {
        if is_native_tag(tag) || is_builtin_component(tag) {
            return None;
        }
        let found = self.search_component(tag);
        if found.is_none() {
            self.logger
                .log(LogLevel::Warn, &format!("unresolved tag <{}>", tag));
        }
        found
    }

    /// File path of the component a tag refers to, trying its
    /// UpperCamelCase, kebab-case and as-written spellings in that order.
    pub fn search_file_path(&self, name: &str) -> Option<&'a str> {
        self.search_component(name).map(|(_, path)| path)
    }

    fn search_component(&self, name: &str) -> Option<(&'a str, &'a str)> {
        let registry: &'a ComponentRegistry = self.registry;
        [to_upper_camel_case(name), to_kebab_case(name), name.to_string()]
            .iter()
            .find_map(|candidate| registry.get_key_value(candidate))
    }

    fn collect_tags(&self, file_path: &str) -> anyhow::Result<Option<Vec<String>>> {
        self.logger
            .log(LogLevel::Debug, &format!("loading {}", file_path));
        let source = self
            .root
            .join(normalize_path(file_path))?
            .read_to_string()
            .with_context(|| format!("failed to read {}", file_path))?;
        let Some(template) = self
            .parser
            .extract_template(&source)
            .with_context(|| format!("failed to parse {}", file_path))?
        else {
            return Ok(None);
        };
        let roots = self
            .parser
            .compile(&template)
            .with_context(|| format!("failed to parse {}", file_path))?;
        if roots.is_empty() {
            return Ok(None);
        }

        let mut tags = Vec::new();
        for root in &roots {
            traverse_tags(root, &mut tags);
        }
        Ok(Some(tags))
    }
}

/// Pre-order collection of an element's tag and all descendant tags. The
/// other branches of a `v-if` chain are collected once each, together with
/// their own descendants.
fn traverse_tags(element: &Element, tags: &mut Vec<String>) {
    tags.push(element.tag.clone());
    for branch in &element.if_branches {
        if !tags.contains(&branch.tag) {
            tags.push(branch.tag.clone());
        }
        for child in &branch.children {
            traverse_tags(child, tags);
        }
    }
    for child in &element.children {
        traverse_tags(child, tags);
    }
}
