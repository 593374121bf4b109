//! Single-file component parser backing the graph loader's template boundary.

mod block;
mod scanner;
mod template;

pub use block::extract_template;
pub use template::compile_template;

use vurif_core::{Element, TemplateParser};

pub struct SfcParser;

impl TemplateParser for SfcParser {
    fn extract_template(&self, source: &str) -> anyhow::Result<Option<String>> {
        Ok(extract_template(source)?.map(str::to_string))
    }

    fn compile(&self, template: &str) -> anyhow::Result<Vec<Element>> {
        Ok(compile_template(template)?)
    }
}
