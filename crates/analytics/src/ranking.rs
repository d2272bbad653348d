use crate::periods::DateWindow;
use chrono::NaiveDate;
use core_types::{format_brl, Ledger};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// One line of a top-N breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry<K> {
    pub key: K,
    pub amount: Decimal,
    pub formatted: String,
}

/// Days in `window` with the highest totals.
///
/// Equal totals keep ascending date order.
pub fn top_days(ledger: &Ledger, window: DateWindow, limit: usize) -> Vec<RankedEntry<NaiveDate>> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for row in ledger.iter().filter(|row| window.contains(row.issue_date)) {
        add_to(totals.entry(row.issue_date).or_insert(Decimal::ZERO), row.amount);
    }
    rank(totals, limit)
}

/// Customers in `window` with the highest totals.
///
/// Blank names and names containing `generic_marker` (ignoring case) are left
/// out. Equal totals keep ascending name order.
pub fn top_customers(
    ledger: &Ledger,
    window: DateWindow,
    limit: usize,
    generic_marker: &str,
) -> Vec<RankedEntry<String>> {
    let marker = generic_marker.trim().to_lowercase();
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for row in ledger.iter().filter(|row| window.contains(row.issue_date)) {
        let Some(name) = row.customer_name.as_deref().map(str::trim) else {
            continue;
        };
        if name.is_empty() || name.to_lowercase().contains(&marker) {
            continue;
        }
        add_to(totals.entry(name.to_string()).or_insert(Decimal::ZERO), row.amount);
    }

    rank(totals, limit)
}

fn add_to(total: &mut Decimal, amount: Decimal) {
    *total = total.saturating_add(amount);
}

fn rank<K: Ord>(totals: BTreeMap<K, Decimal>, limit: usize) -> Vec<RankedEntry<K>> {
    let mut entries: Vec<(K, Decimal)> = totals.into_iter().collect();
    // `sort_by` is stable, so ties stay in key order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
        .into_iter()
        .take(limit)
        .map(|(key, amount)| RankedEntry {
            key,
            amount,
            formatted: format_brl(amount),
        })
        .collect()
}
