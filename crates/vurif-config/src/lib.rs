use serde::Deserialize;
use vfs::VfsPath;
use vurif_core::{LogLevel, Logger};
use vurif_output::OutputFormat;

pub const CONFIG_FILE: &str = "vurif.toml";

/// Project settings read from `vurif.toml`. Every field is optional and
/// command line values take precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub components_dir: Option<String>,
    pub format: Option<OutputFormat>,
    pub port: Option<u16>,
    pub out_dir: Option<String>,
    pub ignore: Vec<String>,
}

impl ProjectConfig {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Load `vurif.toml` from `root`. A missing file yields the defaults; an
/// unreadable or malformed one is logged and also yields the defaults.
pub fn load_config(root: &VfsPath, logger: &dyn Logger) -> anyhow::Result<ProjectConfig> {
    let path = root.join(CONFIG_FILE)?;
    if !path.exists()? {
        return Ok(ProjectConfig::default());
    }
    let contents = match path.read_to_string() {
        Ok(c) => c,
        Err(e) => {
            logger.log(
                LogLevel::Error,
                &format!("failed to read {}: {e}", path.as_str()),
            );
            return Ok(ProjectConfig::default());
        }
    };
    match ProjectConfig::parse(&contents) {
        Ok(config) => {
            logger.log(LogLevel::Debug, &format!("loaded {}", CONFIG_FILE));
            Ok(config)
        }
        Err(e) => {
            logger.log(
                LogLevel::Error,
                &format!("failed to parse {}: {e}", CONFIG_FILE),
            );
            Ok(ProjectConfig::default())
        }
    }
}
