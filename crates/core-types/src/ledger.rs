use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One invoice line from the sales sheet, after type normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub issue_date: NaiveDate,
    pub amount: Decimal,
    /// `None` when the source schema has no customer column at all.
    pub customer_name: Option<String>,
}

impl LedgerRow {
    pub fn new(issue_date: NaiveDate, amount: Decimal) -> Self {
        Self {
            issue_date,
            amount,
            customer_name: None,
        }
    }

    pub fn with_customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }
}

/// The normalised sales ledger.
///
/// Row order carries no meaning and duplicates are kept: two identical invoice
/// lines are two sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<LedgerRow>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: LedgerRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerRow> {
        self.rows.iter()
    }

    /// Sums `amount` over every row accepted by `predicate`.
    ///
    /// The total saturates at the `Decimal` bounds instead of overflowing.
    pub fn sum_where<F>(&self, predicate: F) -> Decimal
    where
        F: Fn(&LedgerRow) -> bool,
    {
        self.rows
            .iter()
            .filter(|row| predicate(row))
            .fold(Decimal::ZERO, |total, row| total.saturating_add(row.amount))
    }
}

impl FromIterator<LedgerRow> for Ledger {
    fn from_iter<I: IntoIterator<Item = LedgerRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerRow;
    type IntoIter = std::slice::Iter<'a, LedgerRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
