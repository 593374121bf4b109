pub mod error;
pub mod logger;
pub mod markup;
pub mod naming;
pub mod node;
pub mod registry;
pub mod tags;
pub mod util;

pub use error::VurifError;
pub use logger::{ConsoleLogger, EmptyLogger, LogLevel, Logger};
pub use markup::{Attribute, Element, TemplateParser};
pub use naming::{to_kebab_case, to_upper_camel_case};
pub use node::{ComponentKey, Edges, Node};
pub use registry::ComponentRegistry;
pub use util::{VUE_EXTENSION, is_vue_file, normalize_path, relative_path, vue_file_name_or_err};

#[cfg(any(test, feature = "testutil"))]
pub mod test_util;
#[cfg(any(test, feature = "testutil"))]
pub use logger::MemoryLogger;
