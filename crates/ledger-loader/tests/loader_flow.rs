// Loader tests against in-memory sources: the HTTP transport is not exercised
// here, only what the loader does with whatever the source returns.

use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::SourceConfig;
use ledger_loader::{LedgerLoader, LedgerSource, LoaderError, StaticCsvSource};
use rust_decimal_macros::dec;
use std::sync::Arc;

const SHEET: &str = "\
Numero, Emissao ,Cliente,Total Nota
1001,01/03/2025,Ana Souza,\"R$ 1.200,00\"
1002,01/03/2025,CONSUMIDOR FINAL,\"R$ 80,50\"
1003,02/03/2025,  Bruno Lima  ,\"R$ 300,00\"
1004,,Carla,\"R$ 999,99\"
1005,03/03/2025,Carla,sem valor
";

/// A source whose download always fails, like an unreachable sheet.
struct BrokenSource;

#[async_trait]
impl LedgerSource for BrokenSource {
    async fn fetch_csv(&self) -> Result<String, LoaderError> {
        Err(LoaderError::BadStatus {
            status: 503,
            url: "https://sheets.invalid/pub.csv".to_string(),
        })
    }

    fn describe(&self) -> String {
        "broken".to_string()
    }
}

fn loader_for(csv: &str, config: SourceConfig) -> LedgerLoader {
    LedgerLoader::new(Arc::new(StaticCsvSource::new("fixture", csv)), config)
}

#[tokio::test]
async fn load_normalises_the_sheet() {
    let ledger = loader_for(SHEET, SourceConfig::default()).load().await.unwrap();

    // Row 1004 has no date and is dropped; 1005 keeps a zero amount.
    assert_eq!(ledger.len(), 4);
    assert_eq!(ledger.sum_where(|_| true), dec!(1580.50));

    let bruno = &ledger.rows()[2];
    assert_eq!(bruno.customer_name.as_deref(), Some("Bruno Lima"));
    assert_eq!(bruno.issue_date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());

    let carla = &ledger.rows()[3];
    assert_eq!(carla.amount, dec!(0));
}

#[tokio::test]
async fn load_reports_missing_amount_column_with_found_columns() {
    let config = SourceConfig {
        amount_column: "Valor Total".to_string(),
        ..SourceConfig::default()
    };
    let err = loader_for(SHEET, config).load().await.unwrap_err();

    match err {
        LoaderError::MissingColumn { column, found } => {
            assert_eq!(column, "Valor Total");
            assert_eq!(found, vec!["Numero", "Emissao", "Cliente", "Total Nota"]);
        }
        other => panic!("expected a schema error, got {other:?}"),
    }
}

#[tokio::test]
async fn load_requires_a_configured_customer_column() {
    let csv = "Emissao,Total Nota\n01/03/2025,\"10,00\"\n";
    let err = loader_for(csv, SourceConfig::default()).load().await.unwrap_err();
    assert!(err.is_schema_error());
    assert!(err.to_string().contains("Cliente"));

    let legacy = SourceConfig {
        customer_column: None,
        ..SourceConfig::default()
    };
    let ledger = loader_for(csv, legacy).load().await.unwrap();
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn source_failures_pass_through_unchanged() {
    let loader = LedgerLoader::new(Arc::new(BrokenSource), SourceConfig::default());
    let err = loader.load().await.unwrap_err();

    assert!(!err.is_schema_error());
    assert!(matches!(err, LoaderError::BadStatus { status: 503, .. }));
}
