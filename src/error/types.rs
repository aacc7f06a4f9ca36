use thiserror::Error;

/// Unified result type for the gutter crate.
pub type Result<T> = std::result::Result<T, AlignError>;

/// Errors surfaced by the alignment writer.
///
/// Terminal queries fail soft (see [`crate::Terminal`]), so the only
/// failure path callers observe is I/O on the output handle.
#[derive(Debug, Error)]
pub enum AlignError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
