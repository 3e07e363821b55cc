use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required 'version' field")]
    MissingVersion,

    #[error("unsupported rule table version: {0} (supported: 1)")]
    UnsupportedVersion(u32),

    #[error("missing required 'host_process' field")]
    MissingHostProcess,

    #[error("missing required 'subject' field")]
    MissingSubject,

    #[error("hook #{0} has an empty 'class'")]
    EmptyClass(usize),

    #[error("hook #{0} has an empty 'method'")]
    EmptyMethod(usize),

    #[error("hook '{0}' has an empty 'value'")]
    EmptyMatchValue(String),

    #[error("'{0}' is hooked more than once")]
    DuplicateTarget(String),
}

pub type Result<T> = std::result::Result<T, RuleError>;
