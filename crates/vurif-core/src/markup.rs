//! Boundary between the graph loader and a concrete template parser.
//!
//! The loader only needs three things from a template element: its tag, its
//! child elements, and the other branches of a conditional chain it heads.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
    /// `v-else-if` / `v-else` siblings folded into the `v-if` element that
    /// heads the chain. The head itself is not repeated here.
    pub if_branches: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    pub fn with_if_branches(mut self, branches: Vec<Element>) -> Self {
        self.if_branches = branches;
        self
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }
}

pub trait TemplateParser: Send + Sync {
    /// Return the raw source of the component's template block, if any.
    fn extract_template(&self, source: &str) -> anyhow::Result<Option<String>>;

    /// Compile template source into its top-level elements. An empty
    /// template yields an empty list.
    fn compile(&self, template: &str) -> anyhow::Result<Vec<Element>>;
}
