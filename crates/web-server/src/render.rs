//! Server-side HTML for the single dashboard page.

use crate::view::{format_percent, DashboardPayload, DashboardView, MetricView, RankedRow};
use std::fmt::Write;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;background:#f6f7f9;color:#222}\
h1{font-size:1.4rem}\
.cards{display:flex;flex-wrap:wrap;gap:1rem;margin:1rem 0}\
.card{background:#fff;border-radius:8px;padding:1rem;min-width:15rem;box-shadow:0 1px 3px #0002}\
.card h2{font-size:1rem;margin:0 0 .5rem}\
.value{font-size:1.5rem;font-weight:600}\
.up{color:#1a7f37}.down{color:#cf222e}.flat{color:#666}\
table{background:#fff;border-collapse:collapse;margin-right:2rem}\
td,th{padding:.4rem .8rem;border-bottom:1px solid #eee;text-align:left}\
.tables{display:flex;flex-wrap:wrap;gap:1rem}\
.error{background:#fff0f0;border:1px solid #cf222e;padding:1rem;border-radius:8px}";

/// Renders the whole page for either outcome of a dashboard request.
pub fn render_dashboard(title: &str, payload: &DashboardPayload) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", escape_html(title));
    body.push_str(&reference_form(payload.reference()));

    match payload {
        DashboardPayload::Ok(view) => body.push_str(&render_view(view)),
        DashboardPayload::Error(bundle) => {
            let _ = write!(
                body,
                "<div class=\"error\"><strong>Error:</strong> {}</div>",
                escape_html(&bundle.error)
            );
        }
    }

    format!(
        "<!DOCTYPE html><html lang=\"pt-BR\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
         <title>{}</title><style>{}</style></head><body>{}</body></html>",
        escape_html(title),
        STYLE,
        body
    )
}

fn reference_form(reference: &str) -> String {
    format!(
        "<form method=\"get\" action=\"/\"><label>Reference date \
         <input type=\"date\" name=\"ref\" value=\"{}\"></label> \
         <button type=\"submit\">Update</button></form>",
        escape_html(reference)
    )
}

fn render_view(view: &DashboardView) -> String {
    let mut html = String::from("<div class=\"cards\">");
    html.push_str(&metric_card(
        &format!("Today ({})", view.today),
        &format!("vs yesterday ({})", view.yesterday),
        &view.day_over_day,
    ));
    html.push_str(&metric_card(
        "Today vs last year",
        &format!("vs {}", view.last_year_day),
        &view.same_day_last_year,
    ));
    html.push_str(&metric_card(
        "Today vs last year, next day",
        &format!("vs {}", view.last_year_next_day),
        &view.day_after_last_year,
    ));
    html.push_str(&metric_card(
        &format!("Month to date (since {})", view.month_start),
        "vs previous month, same span",
        &view.month_over_month,
    ));
    html.push_str(&metric_card(
        "Month to date vs last year",
        "vs same month last year, same span",
        &view.year_over_year,
    ));
    html.push_str("</div><div class=\"tables\">");
    html.push_str(&ranking_table("Top days this month", "Day", &view.top_days));
    html.push_str(&ranking_table(
        "Top customers this month",
        "Customer",
        &view.top_customers,
    ));
    html.push_str("</div>");
    html
}

fn metric_card(title: &str, comparison_label: &str, metric: &MetricView) -> String {
    let class = match metric.percent_change {
        Some(pct) if pct > 0.0 => "up",
        Some(pct) if pct < 0.0 => "down",
        _ => "flat",
    };
    format!(
        "<div class=\"card\"><h2>{}</h2>\
         <div class=\"value\">{}</div>\
         <div>{} <small>({})</small>: {}</div>\
         <div class=\"{}\">{}</div></div>",
        escape_html(title),
        escape_html(&metric.current),
        escape_html(comparison_label),
        escape_html(&metric.comparison_period),
        escape_html(&metric.comparison),
        class,
        format_percent(metric.percent_change)
    )
}

fn ranking_table(caption: &str, key_header: &str, rows: &[RankedRow]) -> String {
    let mut html = format!(
        "<table><caption>{}</caption><tr><th>#</th><th>{}</th><th>Total</th></tr>",
        escape_html(caption),
        escape_html(key_header)
    );
    if rows.is_empty() {
        html.push_str("<tr><td colspan=\"3\">No sales in this period.</td></tr>");
    }
    for (position, row) in rows.iter().enumerate() {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            position + 1,
            escape_html(&row.label),
            escape_html(&row.amount)
        );
    }
    html.push_str("</table>");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
