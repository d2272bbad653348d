//! # Salesboard Ledger Loader
//!
//! Downloads the published sales sheet and turns it into a [`Ledger`].
//!
//! Every field is read as text first. Column presence is checked before any
//! row is converted; after that the loader is deliberately forgiving: a bad
//! amount becomes zero and a row whose date cannot be read is dropped.

use crate::dates::parse_issue_date;
use crate::schema::{normalize_header, ColumnMap};
use configuration::SourceConfig;
use core_types::{parse_amount, Ledger, LedgerRow};
use std::sync::Arc;

pub mod dates;
pub mod error;
pub mod schema;
pub mod source;

// --- Public API ---
pub use error::LoaderError;
pub use source::{HttpCsvSource, LedgerSource, StaticCsvSource};

/// Fetches and normalises the ledger on every call; nothing is cached.
#[derive(Clone)]
pub struct LedgerLoader {
    source: Arc<dyn LedgerSource>,
    config: SourceConfig,
}

impl LedgerLoader {
    pub fn new(source: Arc<dyn LedgerSource>, config: SourceConfig) -> Self {
        Self { source, config }
    }

    /// A loader reading `config.url` over HTTP.
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(Arc::new(HttpCsvSource::new(config.url.clone())), config.clone())
    }

    pub async fn load(&self) -> Result<Ledger, LoaderError> {
        tracing::info!(source = %self.source.describe(), "Fetching sales ledger.");
        let text = self.source.fetch_csv().await?;
        parse_ledger(&text, &self.config)
    }
}

/// Parses CSV text into a ledger using the column names in `config`.
pub fn parse_ledger(csv_text: &str, config: &SourceConfig) -> Result<Ledger, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    let columns = ColumnMap::resolve(&headers, config)?;

    let mut ledger = Ledger::new();
    let mut dropped = 0usize;

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Short rows read as empty cells.
        let field = |i: usize| record.get(i).unwrap_or("");

        let amount = parse_amount(field(columns.amount));
        let customer_name = columns.customer.map(|i| field(i).trim().to_string());

        match parse_issue_date(field(columns.date)) {
            Some(issue_date) => ledger.push(LedgerRow {
                issue_date,
                amount,
                customer_name,
            }),
            None => {
                dropped += 1;
                // +2: one for the header, one for 1-based line numbers.
                tracing::trace!(
                    line = index + 2,
                    raw = field(columns.date),
                    "Dropping row with unreadable issue date."
                );
            }
        }
    }

    tracing::debug!(kept = ledger.len(), dropped, "Parsed sales ledger.");
    Ok(ledger)
}
