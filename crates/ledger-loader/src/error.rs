use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Column '{column}' not found. Available columns: {found:?}")]
    MissingColumn { column: String, found: Vec<String> },

    #[error("Failed to fetch the sales sheet: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The sales sheet at {url} answered with HTTP {status}")]
    BadStatus { status: u16, url: String },

    #[error("Failed to read the sales sheet as CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl LoaderError {
    /// Schema errors are the caller's to fix and are shown verbatim; every other
    /// variant means the source could not be read at all.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, LoaderError::MissingColumn { .. })
    }
}
