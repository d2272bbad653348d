use crate::error::LoaderError;
use async_trait::async_trait;

/// Anything that can hand back the sales sheet as CSV text.
///
/// The loader only talks to this trait, so the HTTP source can be swapped for a
/// fixed document in tests or for a local export on the command line.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Downloads the whole sheet. There is no paging and no delta fetch.
    async fn fetch_csv(&self) -> Result<String, LoaderError>;

    /// A short label for logs.
    fn describe(&self) -> String;
}

/// A published spreadsheet reachable with an unauthenticated GET.
#[derive(Clone)]
pub struct HttpCsvSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LedgerSource for HttpCsvSource {
    async fn fetch_csv(&self) -> Result<String, LoaderError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LoaderError::BadStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A sheet already held in memory, e.g. read from a local CSV export.
#[derive(Debug, Clone)]
pub struct StaticCsvSource {
    label: String,
    contents: String,
}

impl StaticCsvSource {
    pub fn new(label: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            contents: contents.into(),
        }
    }
}

#[async_trait]
impl LedgerSource for StaticCsvSource {
    async fn fetch_csv(&self) -> Result<String, LoaderError> {
        Ok(self.contents.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
