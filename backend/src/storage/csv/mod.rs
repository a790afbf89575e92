//! # CSV Storage Module
//!
//! File-backed storage for the dues tracker. Each member gets a directory
//! under the base data directory, holding a YAML profile and a CSV ledger:
//!
//! ```text
//! <data-dir>/
//!   ama_owusu/
//!     member.yaml
//!     contributions.csv
//! ```
//!
//! ## Ledger file format
//!
//! ```csv
//! id,member_id,amount,payment_date,receipt_number,notes,created_at
//! due-1705312200000-af3c,ama_owusu,10.00,2024-01-15,RCPT-20240115-9F2C41AB,"January dues",2024-01-15T10:30:00+00:00
//! ```
//!
//! Mutations rewrite the whole ledger file in one truncating write, which is
//! what lets a multi-record allocation land all-or-nothing.

pub mod connection;
pub mod contribution_repository;
pub mod member_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use contribution_repository::ContributionRepository;
pub use member_repository::MemberRepository;
