//! # Salesboard Analytics Engine
//!
//! Turns a normalised sales ledger and a reference date into the dashboard's
//! comparisons and rankings.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It never fetches anything;
//!   it depends only on `core-types` and the analytics settings.
//! - **Stateless Calculation:** `AnalyticsEngine::analyze` is a deterministic
//!   function of its inputs and is recomputed on every request.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: computes an `AnalyticsReport`.
//! - `DateWindow` and the calendar helpers in `periods`.
//! - `percent_change`: the shared current-vs-base rule.
//! - `AnalyticsError`: the only failure, calendar overflow.

// Declare the modules that constitute this crate.
pub mod change;
pub mod engine;
pub mod error;
pub mod periods;
pub mod ranking;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use change::percent_change;
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use periods::{month_start, same_day_last_year, shift_month_start, DateWindow};
pub use ranking::RankedEntry;
pub use report::{AnalyticsReport, Metric};
