use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Date arithmetic left the supported calendar range: {0}")]
    DateOutOfRange(String),
}
