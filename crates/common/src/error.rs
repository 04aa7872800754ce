/// Errors shared by the lifespace crates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
    #[error("replay mismatch: expected {expected}, got {actual}")]
    ReplayMismatch { expected: String, actual: String },
}
