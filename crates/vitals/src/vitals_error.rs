use thiserror::Error;

/// Errors surfaced by the vital-signs pipeline. Every failure is reported as
/// a value to the caller; nothing is retried or recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VitalsError {
    /// A configuration field or cube argument was outside its legal range.
    #[error("invalid argument: {0}")]
    InvalidArg(&'static str),
}
