//! Domain-level command and query types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod members {
    use crate::domain::models::member::Member;

    /// Input for registering a new member.
    #[derive(Debug, Clone)]
    pub struct CreateMemberCommand {
        pub name: String,
        pub staff_id: String,
        pub phone_number: String,
    }

    /// Input for updating a member's profile fields.
    #[derive(Debug, Clone)]
    pub struct UpdateMemberCommand {
        pub member_id: String,
        pub name: Option<String>,
        pub staff_id: Option<String>,
        pub phone_number: Option<String>,
    }

    /// Query parameters for listing members.
    #[derive(Debug, Clone, Default)]
    pub struct MemberListQuery {
        /// Case-insensitive substring match on name or staff ID
        pub search: Option<String>,
    }

    /// Result of registering a member.
    #[derive(Debug, Clone)]
    pub struct CreateMemberResult {
        pub member: Member,
        pub success_message: String,
    }

    /// Result of listing members.
    #[derive(Debug, Clone)]
    pub struct MemberListResult {
        pub members: Vec<Member>,
    }
}

pub mod contributions {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::models::contribution::Contribution;

    /// Input for recording a lump dues payment.
    #[derive(Debug, Clone)]
    pub struct RecordPaymentCommand {
        pub member_id: String,
        pub total_amount: Decimal,
        /// The date the payment logically applies to; its month is topped up
        /// first, any surplus spreads into subsequent months.
        pub payment_date: NaiveDate,
        /// Attached to the first record only
        pub notes: Option<String>,
    }

    /// Result of recording a payment.
    #[derive(Debug, Clone)]
    pub struct RecordPaymentResult {
        /// All records the payment produced, in chronological order
        pub records: Vec<Contribution>,
        pub total_recorded: Decimal,
        pub success_message: String,
    }

    /// Query parameters for listing a member's contribution history.
    #[derive(Debug, Clone, Default)]
    pub struct ContributionListQuery {
        pub year: Option<i32>,
        pub limit: Option<u32>,
    }

    /// Result of listing contributions.
    #[derive(Debug, Clone)]
    pub struct ContributionListResult {
        /// Newest first
        pub contributions: Vec<Contribution>,
        /// Distinct years with payments, most recent first
        pub available_years: Vec<i32>,
    }

    /// Totals for one member and one calendar month.
    #[derive(Debug, Clone)]
    pub struct MonthlySummaryResult {
        pub year: i32,
        pub month: u32,
        pub total: Decimal,
        pub room: Decimal,
        pub ceiling: Decimal,
    }

    /// Administrative edit of an existing ledger record.
    #[derive(Debug, Clone)]
    pub struct UpdateContributionCommand {
        pub record_id: String,
        pub amount: Option<Decimal>,
        pub payment_date: Option<NaiveDate>,
        pub notes: Option<String>,
    }

    /// Result of a ledger edit.
    #[derive(Debug, Clone)]
    pub struct UpdateContributionResult {
        pub contribution: Contribution,
        pub success_message: String,
    }
}
