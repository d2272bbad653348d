use crate::error::LoaderError;
use configuration::SourceConfig;

/// Positions of the columns the ledger needs, resolved once per download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub amount: usize,
    pub customer: Option<usize>,
}

impl ColumnMap {
    /// Finds every required column in `headers`.
    ///
    /// `headers` must already be normalised with [`normalize_header`]. The first
    /// missing column is reported together with the full header list.
    pub fn resolve(headers: &[String], config: &SourceConfig) -> Result<Self, LoaderError> {
        let date = find_column(headers, &config.date_column)?;
        let amount = find_column(headers, &config.amount_column)?;
        let customer = config
            .customer_column()
            .map(|name| find_column(headers, name))
            .transpose()?;

        Ok(Self {
            date,
            amount,
            customer,
        })
    }
}

/// Trims surrounding whitespace and a leading UTF-8 byte order mark.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

fn find_column(headers: &[String], name: &str) -> Result<usize, LoaderError> {
    let wanted = name.trim();
    headers
        .iter()
        .position(|header| header == wanted)
        .ok_or_else(|| LoaderError::MissingColumn {
            column: wanted.to_string(),
            found: headers.to_vec(),
        })
}
