//! Data layer: typed records, loading, filtering, statistics and the
//! claims/policies join.
//!
//! Architecture:
//! ```text
//!  claims_data.csv  policies_data.csv  fraud_indicators.csv
//!        │                 │                  │
//!        ▼                 ▼                  ▼
//!   ┌──────────┐
//!   │  loader   │  header check, typed parse → Table<Record>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  category sets, explorer criteria, id search
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌──────────┐   ┌──────────┐
//!   │  stats    │   │  join     │  claims ⟕ policies → high-risk view
//!   └──────────┘   └──────────┘
//!        │              │
//!        ▼              ▼
//!   ┌────────────────────────┐
//!   │     DatasetService     │  one data directory, no caching
//!   └────────────────────────┘
//! ```

pub mod error;
pub mod filter;
pub mod join;
pub mod loader;
pub mod model;
pub mod overview;
pub mod service;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;
