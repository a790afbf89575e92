use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered association member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Stable identifier derived from the member's name
    pub id: String,
    /// Full name of the member
    pub name: String,
    /// External association identifier (staff number)
    pub staff_id: String,
    /// Contact phone number (data only, no outbound messaging)
    pub phone_number: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last profile update timestamp (RFC 3339)
    pub updated_at: String,
}

/// A single dues ledger record.
///
/// Amounts are decimal strings with at most two fractional digits
/// (e.g. `"10.00"`). One record never exceeds the monthly ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub id: String,
    /// ID of the member this record belongs to
    pub member_id: String,
    /// Amount credited to the record's month
    pub amount: Decimal,
    /// Calendar date the amount is credited to (YYYY-MM-DD).
    /// Carried-over records are dated the first day of their month.
    pub payment_date: String,
    /// Receipt number in format RCPT-YYYYMMDD-XXXXXXXX, unique and immutable
    pub receipt_number: String,
    /// Free-text annotation; carried-over records hold a provenance note
    pub notes: Option<String>,
    /// Record creation timestamp (RFC 3339)
    pub created_at: String,
}

impl ContributionRecord {
    /// The (year, month) period this record is credited to
    pub fn period(&self) -> Option<(i32, u32)> {
        NaiveDate::parse_from_str(&self.payment_date, "%Y-%m-%d")
            .ok()
            .map(|d| (d.year(), d.month()))
    }

    /// Whether this record was created by spreading a lump payment forward
    /// from an earlier month
    pub fn is_carried_over(&self) -> bool {
        self.notes
            .as_deref()
            .map_or(false, |n| n.starts_with("Carried over from payment on "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub staff_id: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub staff_id: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub members: Vec<Member>,
}

/// Request to record a dues payment for a member.
///
/// The amount may exceed the monthly ceiling; the surplus is spread into
/// subsequent months, one ledger record per month touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    /// Total amount paid, as a decimal string with at most 2 decimal places
    pub amount: Decimal,
    /// Date the payment applies to (YYYY-MM-DD); its month is topped up first
    pub payment_date: String,
    /// Optional note attached to the first record only
    pub notes: Option<String>,
}

/// Result of recording a payment: every ledger record the payment produced,
/// in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentResponse {
    pub records: Vec<ContributionRecord>,
    /// Sum of all record amounts; equals the submitted amount exactly
    pub total_recorded: Decimal,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionListResponse {
    pub contributions: Vec<ContributionRecord>,
    /// Distinct years with payments, most recent first (for year filters)
    pub available_years: Vec<i32>,
}

/// Totals for one member and one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryResponse {
    pub year: i32,
    pub month: u32,
    /// Sum of record amounts credited to the month
    pub total: Decimal,
    /// Unused capacity left in the month (ceiling - total, floored at zero)
    pub room: Decimal,
    /// The configured monthly ceiling
    pub ceiling: Decimal,
}

/// Administrative edit of an existing ledger record. Does not re-run
/// allocation; the receipt number is never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateContributionRequest {
    pub amount: Option<Decimal>,
    /// New payment date (YYYY-MM-DD)
    pub payment_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionResponse {
    pub contribution: ContributionRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteContributionResponse {
    pub deleted: bool,
    pub success_message: String,
}
