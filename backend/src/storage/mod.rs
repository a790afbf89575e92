//! # Storage Module
//!
//! Data persistence for the dues tracker. The domain layer only sees the
//! traits defined in `traits`; the `csv` module provides the file-backed
//! implementation (per-member directory with a YAML profile and a
//! contributions CSV ledger).

pub mod csv;
pub mod traits;

pub use csv::CsvConnection;
pub use traits::{ContributionStorage, MemberStorage};
