use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VurifError {
    #[error("{path} should be a vue file.")]
    InvalidInput { path: String },

    #[error("{path} does not exist.")]
    RootNotFound { path: String },

    #[error("template parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("components directory is not given (pass it as an argument or set `components_dir` in vurif.toml)")]
    MissingComponentsDir,
}

impl VurifError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        VurifError::Parse {
            line,
            message: message.into(),
        }
    }
}
