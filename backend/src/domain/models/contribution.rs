//! Domain model for a dues ledger record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One dues contribution credited to a single calendar month.
///
/// The (year, month) of `payment_date` is the period the amount counts
/// toward. Records created by spreading a lump payment into later months are
/// dated the first day of their month and annotated with a provenance note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub member_id: String,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    /// Unique receipt identifier, assigned at creation and never regenerated
    pub receipt_number: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Contribution {
    /// Generate a unique record ID.
    /// Format: due-<timestamp_ms>-<random_suffix>
    /// Example: due-1625846400123-af3c
    pub fn generate_id(timestamp_ms: u64) -> String {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(4).collect();
        format!("due-{}-{}", timestamp_ms, suffix)
    }

    /// Generate a receipt number for a record dated `payment_date`.
    /// Format: RCPT-YYYYMMDD-8CHAR_UUID
    pub fn generate_receipt_number(payment_date: NaiveDate) -> String {
        let date_str = payment_date.format("%Y%m%d");
        let unique: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase();
        format!("RCPT-{}-{}", date_str, unique)
    }
}
