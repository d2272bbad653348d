// Handler-level tests: the handlers are called directly with an in-memory
// ledger source, so no socket or network is involved.

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use configuration::{AnalyticsSettings, ServerConfig, SourceConfig};
use ledger_loader::{LedgerLoader, LedgerSource, LoaderError, StaticCsvSource};
use std::sync::Arc;
use web_server::handlers::{self, DashboardQuery};
use web_server::view::{DashboardPayload, SOURCE_UNAVAILABLE_MESSAGE};
use web_server::AppState;

const SHEET: &str = "\
Emissao,Cliente,Total Nota
15/03/2025,Ana Souza,\"R$ 1.500,00\"
14/03/2025,Bruno Lima,\"R$ 1.000,00\"
10/03/2025,CONSUMIDOR FINAL,\"R$ 2.000,00\"
15/02/2025,Ana Souza,\"R$ 900,00\"
15/03/2024,Carla,\"R$ 750,00\"
16/03/2024,Carla,\"R$ 3.000,00\"
";

struct UnreachableSource;

#[async_trait]
impl LedgerSource for UnreachableSource {
    async fn fetch_csv(&self) -> Result<String, LoaderError> {
        Err(LoaderError::BadStatus {
            status: 404,
            url: "https://sheets.invalid/pub.csv".to_string(),
        })
    }

    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}

fn state_with(source: Arc<dyn LedgerSource>, config: SourceConfig) -> Arc<AppState> {
    Arc::new(AppState::new(
        LedgerLoader::new(source, config),
        AnalyticsSettings::default(),
        "Test Store",
    ))
}

fn sheet_state() -> Arc<AppState> {
    state_with(
        Arc::new(StaticCsvSource::new("fixture", SHEET)),
        SourceConfig::default(),
    )
}

fn query(reference: &str) -> Query<DashboardQuery> {
    Query(DashboardQuery {
        reference: Some(reference.to_string()),
    })
}

#[tokio::test]
async fn json_dashboard_for_a_reference_date() {
    let (status, payload) = handlers::dashboard_json(State(sheet_state()), query("2025-03-15"))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    let view = match payload.0 {
        DashboardPayload::Ok(view) => view,
        other => panic!("expected a dashboard, got {other:?}"),
    };

    assert_eq!(view.reference, "2025-03-15");
    assert_eq!(view.today, "15/03/2025");
    assert_eq!(view.yesterday, "14/03/2025");
    assert_eq!(view.last_year_day, "15/03/2024");
    assert_eq!(view.last_year_next_day, "16/03/2024");
    assert_eq!(view.month_start, "01/03/2025");

    assert_eq!(view.day_over_day.current, "R$ 1.500,00");
    assert_eq!(view.day_over_day.comparison, "R$ 1.000,00");
    assert_eq!(view.day_over_day.percent_change, Some(50.0));

    assert_eq!(view.same_day_last_year.percent_change, Some(100.0));
    assert_eq!(view.day_after_last_year.percent_change, Some(-50.0));

    assert_eq!(view.month_over_month.current, "R$ 4.500,00");
    assert_eq!(view.month_over_month.comparison, "R$ 900,00");
    assert_eq!(view.month_over_month.percent_change, Some(400.0));
    assert_eq!(view.month_over_month.comparison_period, "01/02/2025 - 15/02/2025");

    assert_eq!(view.year_over_year.comparison, "R$ 750,00");

    assert_eq!(view.top_days[0].label, "10/03/2025");
    assert_eq!(view.top_days[0].amount, "R$ 2.000,00");

    let customers: Vec<&str> = view.top_customers.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(customers, vec!["Ana Souza", "Bruno Lima"]);
}

#[tokio::test]
async fn blank_reference_means_today() {
    let state = sheet_state();
    let (_, payload) = handlers::dashboard_json(State(state.clone()), query("  "))
        .await
        .unwrap();

    let today = core_types::format_iso_date(state.settings.today());
    assert_eq!(payload.0.reference(), today);
}

#[tokio::test]
async fn malformed_reference_is_a_bad_request() {
    let err = handlers::dashboard_json(State(sheet_state()), query("15/03/2025"))
        .await
        .unwrap_err();

    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_sheet_returns_error_bundle() {
    let state = state_with(Arc::new(UnreachableSource), SourceConfig::default());
    let (status, payload) = handlers::dashboard_json(State(state), query("2025-03-15"))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    match payload.0 {
        DashboardPayload::Error(bundle) => {
            assert_eq!(bundle.error, SOURCE_UNAVAILABLE_MESSAGE);
            assert_eq!(bundle.reference, "2025-03-15");
        }
        other => panic!("expected an error bundle, got {other:?}"),
    }
}

#[tokio::test]
async fn schema_error_is_shown_verbatim_on_the_page() {
    let config = SourceConfig {
        amount_column: "Valor".to_string(),
        ..SourceConfig::default()
    };
    let state = state_with(Arc::new(StaticCsvSource::new("fixture", SHEET)), config);

    let html = handlers::dashboard_page(State(state), query("2025-03-15"))
        .await
        .unwrap()
        .0;

    assert!(html.contains("Column &#39;Valor&#39; not found"));
    assert!(html.contains("Total Nota"));
    assert!(html.contains("value=\"2025-03-15\""));
}

#[tokio::test]
async fn dashboard_page_renders_rankings() {
    let html = handlers::dashboard_page(State(sheet_state()), query("2025-03-15"))
        .await
        .unwrap()
        .0;

    assert!(html.contains("<title>Test Store</title>"));
    assert!(html.contains("Ana Souza"));
    assert!(!html.contains("CONSUMIDOR FINAL"));
    assert!(html.contains("+400,0%"));
}

#[tokio::test]
async fn json_payload_is_tagged_by_status() {
    let (_, payload) = handlers::dashboard_json(State(sheet_state()), query("2025-03-15"))
        .await
        .unwrap();

    let json = serde_json::to_value(&payload.0).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["top_customers"][0]["label"], "Ana Souza");
    assert!(json["month_over_month"]["percent_change"].is_number());
}

#[tokio::test]
async fn amounts_at_the_decimal_limit_do_not_abort_the_request() {
    let sheet = "\
Emissao,Cliente,Total Nota
15/03/2025,Ana Souza,\"79.228.162.514.264.337.593.543.950.335\"
15/03/2025,Ana Souza,\"1,00\"
";
    let state = state_with(
        Arc::new(StaticCsvSource::new("fixture", sheet)),
        SourceConfig::default(),
    );

    let (status, payload) = handlers::dashboard_json(State(state), query("2025-03-15"))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    let view = match payload.0 {
        DashboardPayload::Ok(view) => view,
        other => panic!("expected a dashboard, got {other:?}"),
    };
    assert_eq!(view.day_over_day.current, view.top_days[0].amount);
    assert_eq!(view.top_customers[0].label, "Ana Souza");
}

#[tokio::test]
async fn listener_binds_a_host_name() {
    let server = ServerConfig {
        host: "localhost".to_string(),
        port: 0,
    };
    let listener = web_server::bind_listener(&server).await.unwrap();
    assert!(listener.local_addr().unwrap().ip().is_loopback());
}
