//! # Domain Module
//!
//! Business logic for the dues tracker.
//!
//! The heart of this module is the contribution allocator in
//! `contribution_service`: a lump dues payment is split into dated,
//! ceiling-capped monthly ledger records. Everything else exists to support
//! that contract.
//!
//! ## Module Organization
//!
//! - **contribution_service**: payment allocation, ledger queries and edits
//! - **member_service**: member registry (the allocator's existence check)
//! - **calendar**: month arithmetic for period advancement
//! - **commands**: internal command/query/result types
//! - **models**: member and contribution domain models
//! - **errors**: the typed `LedgerError` the services surface
//!
//! ## Business Rules
//!
//! - One member is credited at most the monthly ceiling per calendar month
//! - A lump payment tops up its target month, then spreads forward
//! - Records always carry a positive amount; zero-amount records never exist
//! - Receipt numbers are assigned at creation and never regenerated
//! - Ledger edits are plain row edits and never re-run allocation

pub mod calendar;
pub mod commands;
pub mod contribution_service;
pub mod errors;
pub mod member_service;
pub mod models;

pub use contribution_service::{AllocationPolicy, ContributionService};
pub use errors::{LedgerError, LedgerResult};
pub use member_service::MemberService;
