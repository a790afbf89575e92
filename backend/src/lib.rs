//! Dues tracker backend.
//!
//! Core: the contribution allocator in [`domain::contribution_service`],
//! which splits lump dues payments into dated, ceiling-capped monthly ledger
//! records. The storage layer keeps one directory per member (YAML profile
//! plus CSV ledger); the REST layer exposes the payment-submission and
//! ledger endpoints.

pub mod domain;
pub mod io;
pub mod storage;

pub use storage::csv::CsvConnection;
