//! Typed errors surfaced by the domain services.

use thiserror::Error;

/// Failures a ledger operation can surface to its caller.
///
/// `InvalidInput` and the not-found variants are precondition failures with
/// no side effects; `Persistence` wraps storage errors. The multi-record
/// allocation write is all-or-nothing, so a `Persistence` failure never
/// leaves a partially applied allocation behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("contribution record not found: {0}")]
    RecordNotFound(String),

    #[error("storage failure: {0}")]
    Persistence(#[from] anyhow::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
