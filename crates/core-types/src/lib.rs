//! # Salesboard Core Types
//!
//! The shared vocabulary of the workspace: the normalised sales ledger and the
//! two fixed text formats the dashboard speaks (BRL money and day-first dates).
//!
//! As a Layer 0 crate it has no knowledge of HTTP, CSV or configuration.

pub mod dates;
pub mod error;
pub mod ledger;
pub mod money;

// Re-export the core types to provide a clean public API.
pub use dates::{
    format_display_date, format_display_range, format_iso_date, parse_reference_date,
};
pub use error::CoreError;
pub use ledger::{Ledger, LedgerRow};
pub use money::{format_brl, parse_amount};
