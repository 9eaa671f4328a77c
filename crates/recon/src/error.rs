use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty merge fields, zero bounds, etc.).
    ConfigValidation(String),
    /// The operator-input channel failed (closed stdin, IO error).
    Prompt(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Prompt(msg) => write!(f, "operator input error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
