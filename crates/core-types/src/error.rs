use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid reference date '{input}' (expected YYYY-MM-DD): {reason}")]
    InvalidReferenceDate { input: String, reason: String },
}
