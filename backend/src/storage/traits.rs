//! # Storage Traits
//!
//! Storage abstraction traits that allow different storage backends to be
//! used interchangeably in the domain layer.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::domain::models::contribution::Contribution;
use crate::domain::models::member::Member;

/// Trait defining the interface for member storage operations
pub trait MemberStorage: Send + Sync {
    /// Store a new member
    fn store_member(&self, member: &Member) -> Result<()>;

    /// Retrieve a specific member by ID
    fn get_member(&self, member_id: &str) -> Result<Option<Member>>;

    /// List all members ordered by name
    fn list_members(&self) -> Result<Vec<Member>>;

    /// Update an existing member
    fn update_member(&self, member: &Member) -> Result<()>;

    /// Delete a member by ID
    /// Returns true if the member was found and deleted, false otherwise
    fn delete_member(&self, member_id: &str) -> Result<bool>;
}

/// Trait defining the interface for contribution ledger storage.
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different backends without
/// modification.
pub trait ContributionStorage: Send + Sync {
    /// Append a batch of records to a member's ledger in one write.
    /// Either every record in the batch is persisted or none are.
    fn append_contributions(&self, member_id: &str, records: &[Contribution]) -> Result<()>;

    /// Retrieve a specific record by ID
    fn get_contribution(&self, member_id: &str, record_id: &str) -> Result<Option<Contribution>>;

    /// List all records for a member, ordered by payment date ascending
    fn list_contributions(&self, member_id: &str) -> Result<Vec<Contribution>>;

    /// Sum of record amounts for a member in the given (year, month)
    fn monthly_total(&self, member_id: &str, year: i32, month: u32) -> Result<Decimal>;

    /// Update an existing record in place
    fn update_contribution(&self, record: &Contribution) -> Result<()>;

    /// Delete a single record
    /// Returns true if the record was found and deleted, false otherwise
    fn delete_contribution(&self, member_id: &str, record_id: &str) -> Result<bool>;

    /// Find which member a record belongs to by scanning member ledgers
    fn find_member_for_record(&self, record_id: &str) -> Result<Option<String>>;
}
