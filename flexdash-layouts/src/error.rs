use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
