//! Dues contribution service.
//!
//! Home of the payment allocator: a lump payment tops up its target month to
//! the monthly ceiling, then spreads the remainder into subsequent months,
//! one ledger record per month touched, until the full amount is placed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::info;
use rust_decimal::Decimal;

use crate::domain::calendar;
use crate::domain::commands::contributions::{
    ContributionListQuery, ContributionListResult, MonthlySummaryResult, RecordPaymentCommand,
    RecordPaymentResult, UpdateContributionCommand, UpdateContributionResult,
};
use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::member_service::MemberService;
use crate::domain::models::contribution::Contribution;
use crate::storage::csv::{ContributionRepository, CsvConnection};
use crate::storage::traits::ContributionStorage;

/// Allocation policy knobs. The ceiling is the maximum amount creditable to
/// one member in one calendar month; it is configuration, not a constant
/// baked into the allocation loop.
#[derive(Debug, Clone)]
pub struct AllocationPolicy {
    pub monthly_ceiling: Decimal,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            // 10.00 currency units
            monthly_ceiling: Decimal::new(1000, 2),
        }
    }
}

/// Service for recording and querying dues contributions.
#[derive(Clone)]
pub struct ContributionService {
    contribution_repository: ContributionRepository,
    member_service: MemberService,
    policy: AllocationPolicy,
    /// Per-member locks serializing the read-room/write-records section of
    /// an allocation. Clones share the map, so every handle of this service
    /// contends on the same locks.
    member_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl ContributionService {
    /// Create a new ContributionService
    pub fn new(csv_conn: Arc<CsvConnection>, policy: AllocationPolicy) -> Self {
        let contribution_repository = ContributionRepository::new((*csv_conn).clone());
        let member_service = MemberService::new(csv_conn);
        Self {
            contribution_repository,
            member_service,
            policy,
            member_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn member_lock(&self, member_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.member_locks.lock().unwrap();
        locks
            .entry(member_id.to_string())
            .or_insert_with(Default::default)
            .clone()
    }

    fn require_member(&self, member_id: &str) -> LedgerResult<crate::domain::models::member::Member> {
        self.member_service
            .get_member(member_id)?
            .ok_or_else(|| LedgerError::MemberNotFound(member_id.to_string()))
    }

    /// Record a lump dues payment, splitting it into ceiling-capped monthly
    /// records.
    ///
    /// The target month is topped up first (bounded by its remaining room);
    /// any surplus lands in subsequent months, one record per month, each at
    /// most one ceiling. Every record of the batch is persisted in a single
    /// ledger write, so a storage failure leaves no partial allocation.
    ///
    /// A non-positive amount creates no records and is not an error.
    pub fn record_payment(&self, command: RecordPaymentCommand) -> LedgerResult<RecordPaymentResult> {
        info!(
            "Recording payment of {} for member '{}' dated {}",
            command.total_amount, command.member_id, command.payment_date
        );

        let member = self.require_member(&command.member_id)?;

        if command.total_amount <= Decimal::ZERO {
            return Ok(RecordPaymentResult {
                records: Vec::new(),
                total_recorded: Decimal::ZERO,
                success_message: "Nothing to record".to_string(),
            });
        }

        let ceiling = self.policy.monthly_ceiling;
        let lock = self.member_lock(&member.id);
        let _guard = lock.lock().unwrap();

        // Check existing payments in the target month to top it up first
        let (year, month) = calendar::period(command.payment_date);
        let existing = self
            .contribution_repository
            .monthly_total(&member.id, year, month)?;
        let room = (ceiling - existing).max(Decimal::ZERO);
        let first_amount = command.total_amount.min(room);

        let now = Utc::now();
        let timestamp_ms = now.timestamp_millis() as u64;
        let mut records = Vec::new();

        if first_amount > Decimal::ZERO {
            records.push(Contribution {
                id: Contribution::generate_id(timestamp_ms),
                member_id: member.id.clone(),
                amount: first_amount,
                payment_date: command.payment_date,
                receipt_number: Contribution::generate_receipt_number(command.payment_date),
                notes: command.notes.clone(),
                created_at: now,
            });
        }

        // Spread the remainder into subsequent months until exhausted
        let mut remaining = command.total_amount - first_amount;
        let mut current_date = command.payment_date;

        while remaining > Decimal::ZERO {
            current_date = calendar::first_of_next_month(current_date);
            let amount_this_month = remaining.min(ceiling);

            records.push(Contribution {
                id: Contribution::generate_id(timestamp_ms),
                member_id: member.id.clone(),
                amount: amount_this_month,
                payment_date: current_date,
                receipt_number: Contribution::generate_receipt_number(current_date),
                notes: Some(format!(
                    "Carried over from payment on {}",
                    command.payment_date.format("%Y-%m-%d")
                )),
                created_at: now,
            });

            remaining -= amount_this_month;
        }

        self.contribution_repository
            .append_contributions(&member.id, &records)?;

        info!(
            "Recorded {} ledger record(s) totalling {} for member '{}'",
            records.len(),
            command.total_amount,
            member.id
        );

        Ok(RecordPaymentResult {
            success_message: format!(
                "Payment of {} recorded for {} across {} month(s)",
                command.total_amount,
                member.name,
                records.len()
            ),
            total_recorded: command.total_amount,
            records,
        })
    }

    /// A member's payment history, newest first, with optional year filter
    pub fn list_contributions(
        &self,
        member_id: &str,
        query: ContributionListQuery,
    ) -> LedgerResult<ContributionListResult> {
        self.require_member(member_id)?;

        let all = self.contribution_repository.list_contributions(member_id)?;

        let mut available_years: Vec<i32> = all
            .iter()
            .map(|c| calendar::period(c.payment_date).0)
            .collect();
        available_years.sort_unstable();
        available_years.dedup();
        available_years.reverse();

        let mut contributions: Vec<Contribution> = match query.year {
            Some(year) => all
                .into_iter()
                .filter(|c| calendar::period(c.payment_date).0 == year)
                .collect(),
            None => all,
        };
        contributions.reverse();

        if let Some(limit) = query.limit {
            contributions.truncate(limit as usize);
        }

        Ok(ContributionListResult {
            contributions,
            available_years,
        })
    }

    /// Totals for one member and one calendar month
    pub fn monthly_summary(
        &self,
        member_id: &str,
        year: i32,
        month: u32,
    ) -> LedgerResult<MonthlySummaryResult> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidInput(format!(
                "Invalid month: {}. Must be between 1 and 12",
                month
            )));
        }
        self.require_member(member_id)?;

        let ceiling = self.policy.monthly_ceiling;
        let total = self
            .contribution_repository
            .monthly_total(member_id, year, month)?;
        let room = (ceiling - total).max(Decimal::ZERO);

        Ok(MonthlySummaryResult {
            year,
            month,
            total,
            room,
            ceiling,
        })
    }

    /// Administrative edit of a ledger record. Does not re-run allocation;
    /// the receipt number never changes.
    pub fn update_contribution(
        &self,
        command: UpdateContributionCommand,
    ) -> LedgerResult<UpdateContributionResult> {
        let member_id = self
            .contribution_repository
            .find_member_for_record(&command.record_id)?
            .ok_or_else(|| LedgerError::RecordNotFound(command.record_id.clone()))?;

        let mut record = self
            .contribution_repository
            .get_contribution(&member_id, &command.record_id)?
            .ok_or_else(|| LedgerError::RecordNotFound(command.record_id.clone()))?;

        if let Some(amount) = command.amount {
            if amount <= Decimal::ZERO {
                return Err(LedgerError::InvalidInput(
                    "Contribution amount must be positive".to_string(),
                ));
            }
            if amount > self.policy.monthly_ceiling {
                return Err(LedgerError::InvalidInput(format!(
                    "Contribution amount cannot exceed the monthly ceiling of {}",
                    self.policy.monthly_ceiling
                )));
            }
            record.amount = amount;
        }
        if let Some(payment_date) = command.payment_date {
            record.payment_date = payment_date;
        }
        if let Some(notes) = command.notes {
            record.notes = if notes.is_empty() { None } else { Some(notes) };
        }

        self.contribution_repository.update_contribution(&record)?;

        info!("Updated ledger record '{}'", record.id);

        Ok(UpdateContributionResult {
            contribution: record,
            success_message: "Contribution updated successfully".to_string(),
        })
    }

    /// Delete a ledger record.
    /// Returns true if the record was found and deleted, false otherwise.
    pub fn delete_contribution(&self, record_id: &str) -> LedgerResult<bool> {
        let member_id = match self.contribution_repository.find_member_for_record(record_id)? {
            Some(id) => id,
            None => return Ok(false),
        };

        let deleted = self
            .contribution_repository
            .delete_contribution(&member_id, record_id)?;
        if deleted {
            info!("Deleted ledger record '{}'", record_id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::members::CreateMemberCommand;
    use crate::storage::csv::test_utils::TestEnvironment;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn setup() -> (ContributionService, TestEnvironment) {
        let env = TestEnvironment::new().unwrap();
        let conn = Arc::new(env.connection.clone());
        let service = ContributionService::new(conn, AllocationPolicy::default());
        (service, env)
    }

    fn create_member(service: &ContributionService, name: &str) -> String {
        let result = service
            .member_service
            .create_member(CreateMemberCommand {
                name: name.to_string(),
                staff_id: "STF-001".to_string(),
                phone_number: "0244000000".to_string(),
            })
            .expect("Failed to create test member");
        result.member.id
    }

    fn pay(
        service: &ContributionService,
        member_id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> RecordPaymentResult {
        service
            .record_payment(RecordPaymentCommand {
                member_id: member_id.to_string(),
                total_amount: amount,
                payment_date: date,
                notes: None,
            })
            .expect("Failed to record payment")
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_single_record_when_amount_fits_month() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        let result = pay(&service, &member, dec!(10.00), ymd(2024, 1, 5));

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].amount, dec!(10.00));
        assert_eq!(result.records[0].payment_date, ymd(2024, 1, 5));
        assert_eq!(result.total_recorded, dec!(10.00));
    }

    #[test]
    fn test_top_up_then_spread_into_following_months() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        // March already holds 7.00
        pay(&service, &member, dec!(7.00), ymd(2024, 3, 1));

        let result = pay(&service, &member, dec!(15.00), ymd(2024, 3, 15));

        assert_eq!(result.records.len(), 3);
        assert_eq!(result.records[0].payment_date, ymd(2024, 3, 15));
        assert_eq!(result.records[0].amount, dec!(3.00));
        assert_eq!(result.records[1].payment_date, ymd(2024, 4, 1));
        assert_eq!(result.records[1].amount, dec!(10.00));
        assert_eq!(result.records[2].payment_date, ymd(2024, 5, 1));
        assert_eq!(result.records[2].amount, dec!(2.00));

        let sum: Decimal = result.records.iter().map(|r| r.amount).sum();
        assert_eq!(sum, dec!(15.00));

        // Target month is exactly at the ceiling afterwards
        let summary = service.monthly_summary(&member, 2024, 3).unwrap();
        assert_eq!(summary.total, dec!(10.00));
        assert_eq!(summary.room, Decimal::ZERO);
    }

    #[test]
    fn test_full_month_skips_straight_to_next() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        pay(&service, &member, dec!(10.00), ymd(2024, 6, 1));

        let result = pay(&service, &member, dec!(5.00), ymd(2024, 6, 10));

        // No record lands in the already-full June
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].payment_date, ymd(2024, 7, 1));
        assert_eq!(result.records[0].amount, dec!(5.00));

        let june = service.monthly_summary(&member, 2024, 6).unwrap();
        assert_eq!(june.total, dec!(10.00));
    }

    #[test]
    fn test_december_payment_rolls_into_next_year() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        let result = pay(&service, &member, dec!(25.00), ymd(2024, 12, 31));

        assert_eq!(result.records.len(), 3);
        assert_eq!(result.records[0].payment_date, ymd(2024, 12, 31));
        assert_eq!(result.records[0].amount, dec!(10.00));
        assert_eq!(result.records[1].payment_date, ymd(2025, 1, 1));
        assert_eq!(result.records[1].amount, dec!(10.00));
        assert_eq!(result.records[2].payment_date, ymd(2025, 2, 1));
        assert_eq!(result.records[2].amount, dec!(5.00));
    }

    #[test]
    fn test_payment_on_the_31st_advances_cleanly() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        let result = pay(&service, &member, dec!(12.00), ymd(2024, 1, 31));

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].payment_date, ymd(2024, 1, 31));
        assert_eq!(result.records[0].amount, dec!(10.00));
        assert_eq!(result.records[1].payment_date, ymd(2024, 2, 1));
        assert_eq!(result.records[1].amount, dec!(2.00));
    }

    #[test]
    fn test_decomposition_is_cent_exact() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        pay(&service, &member, dec!(9.99), ymd(2024, 3, 1));
        let result = pay(&service, &member, dec!(10.01), ymd(2024, 3, 15));

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].amount, dec!(0.01));
        assert_eq!(result.records[1].amount, dec!(10.00));

        let sum: Decimal = result.records.iter().map(|r| r.amount).sum();
        assert_eq!(sum, dec!(10.01));
    }

    #[test]
    fn test_record_count_is_minimal_and_no_zero_amounts() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        let result = pay(&service, &member, dec!(20.00), ymd(2024, 5, 10));

        // 20.00 into an empty month is exactly two full records, never three
        assert_eq!(result.records.len(), 2);
        for record in &result.records {
            assert!(record.amount > Decimal::ZERO);
            assert!(record.amount <= dec!(10.00));
        }
    }

    #[test]
    fn test_non_positive_amount_is_a_no_op() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        let zero = pay(&service, &member, Decimal::ZERO, ymd(2024, 3, 15));
        assert!(zero.records.is_empty());
        assert_eq!(zero.total_recorded, Decimal::ZERO);

        let negative = pay(&service, &member, dec!(-5.00), ymd(2024, 3, 15));
        assert!(negative.records.is_empty());

        let history = service
            .list_contributions(&member, ContributionListQuery::default())
            .unwrap();
        assert!(history.contributions.is_empty());
    }

    #[test]
    fn test_unknown_member_is_rejected() {
        let (service, _env) = setup();

        let result = service.record_payment(RecordPaymentCommand {
            member_id: "nobody".to_string(),
            total_amount: dec!(5.00),
            payment_date: ymd(2024, 3, 15),
            notes: None,
        });
        assert!(matches!(result, Err(LedgerError::MemberNotFound(_))));
    }

    #[test]
    fn test_notes_and_carry_over_provenance() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        let result = service
            .record_payment(RecordPaymentCommand {
                member_id: member.clone(),
                total_amount: dec!(15.00),
                payment_date: ymd(2024, 3, 15),
                notes: Some("Paid at the March meeting".to_string()),
            })
            .unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(
            result.records[0].notes.as_deref(),
            Some("Paid at the March meeting")
        );
        assert_eq!(
            result.records[1].notes.as_deref(),
            Some("Carried over from payment on 2024-03-15")
        );
    }

    #[test]
    fn test_receipt_numbers_unique_and_dated() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        let result = pay(&service, &member, dec!(30.00), ymd(2024, 3, 15));

        assert_eq!(result.records.len(), 3);
        assert!(result.records[0].receipt_number.starts_with("RCPT-20240315-"));
        assert!(result.records[1].receipt_number.starts_with("RCPT-20240401-"));
        assert!(result.records[2].receipt_number.starts_with("RCPT-20240501-"));

        let mut receipts: Vec<&str> = result
            .records
            .iter()
            .map(|r| r.receipt_number.as_str())
            .collect();
        receipts.sort_unstable();
        receipts.dedup();
        assert_eq!(receipts.len(), 3);
    }

    #[test]
    fn test_ceiling_is_policy_not_constant() {
        let env = TestEnvironment::new().unwrap();
        let service = ContributionService::new(
            Arc::new(env.connection.clone()),
            AllocationPolicy {
                monthly_ceiling: dec!(50.00),
            },
        );
        let member = create_member(&service, "Ama Owusu");

        let result = pay(&service, &member, dec!(60.00), ymd(2024, 3, 15));

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].amount, dec!(50.00));
        assert_eq!(result.records[1].amount, dec!(10.00));
    }

    #[test]
    fn test_list_contributions_filters_and_orders() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        pay(&service, &member, dec!(10.00), ymd(2023, 11, 5));
        pay(&service, &member, dec!(10.00), ymd(2024, 2, 10));
        pay(&service, &member, dec!(5.00), ymd(2024, 3, 15));

        let all = service
            .list_contributions(&member, ContributionListQuery::default())
            .unwrap();
        assert_eq!(all.contributions.len(), 3);
        // Newest first
        assert_eq!(all.contributions[0].payment_date, ymd(2024, 3, 15));
        assert_eq!(all.contributions[2].payment_date, ymd(2023, 11, 5));
        assert_eq!(all.available_years, vec![2024, 2023]);

        let only_2023 = service
            .list_contributions(
                &member,
                ContributionListQuery {
                    year: Some(2023),
                    limit: None,
                },
            )
            .unwrap();
        assert_eq!(only_2023.contributions.len(), 1);

        let limited = service
            .list_contributions(
                &member,
                ContributionListQuery {
                    year: None,
                    limit: Some(2),
                },
            )
            .unwrap();
        assert_eq!(limited.contributions.len(), 2);
    }

    #[test]
    fn test_monthly_summary_reports_room() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        pay(&service, &member, dec!(7.00), ymd(2024, 3, 1));

        let summary = service.monthly_summary(&member, 2024, 3).unwrap();
        assert_eq!(summary.total, dec!(7.00));
        assert_eq!(summary.room, dec!(3.00));
        assert_eq!(summary.ceiling, dec!(10.00));

        let result = service.monthly_summary(&member, 2024, 13);
        assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
    }

    #[test]
    fn test_update_contribution_bounds_and_receipt() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        let result = pay(&service, &member, dec!(5.00), ymd(2024, 3, 15));
        let record = &result.records[0];

        let too_big = service.update_contribution(UpdateContributionCommand {
            record_id: record.id.clone(),
            amount: Some(dec!(10.01)),
            payment_date: None,
            notes: None,
        });
        assert!(matches!(too_big, Err(LedgerError::InvalidInput(_))));

        let non_positive = service.update_contribution(UpdateContributionCommand {
            record_id: record.id.clone(),
            amount: Some(Decimal::ZERO),
            payment_date: None,
            notes: None,
        });
        assert!(matches!(non_positive, Err(LedgerError::InvalidInput(_))));

        let updated = service
            .update_contribution(UpdateContributionCommand {
                record_id: record.id.clone(),
                amount: Some(dec!(6.50)),
                payment_date: None,
                notes: Some("corrected".to_string()),
            })
            .unwrap();
        assert_eq!(updated.contribution.amount, dec!(6.50));
        assert_eq!(updated.contribution.receipt_number, record.receipt_number);

        let missing = service.update_contribution(UpdateContributionCommand {
            record_id: "due-0-none".to_string(),
            amount: Some(dec!(1.00)),
            payment_date: None,
            notes: None,
        });
        assert!(matches!(missing, Err(LedgerError::RecordNotFound(_))));
    }

    #[test]
    fn test_delete_contribution() {
        let (service, _env) = setup();
        let member = create_member(&service, "Ama Owusu");

        let result = pay(&service, &member, dec!(5.00), ymd(2024, 3, 15));
        let record_id = result.records[0].id.clone();

        assert!(service.delete_contribution(&record_id).unwrap());
        assert!(!service.delete_contribution(&record_id).unwrap());

        let history = service
            .list_contributions(&member, ContributionListQuery::default())
            .unwrap();
        assert!(history.contributions.is_empty());
    }

    #[test]
    fn test_allocation_touches_only_its_member() {
        let (service, _env) = setup();
        let ama = create_member(&service, "Ama Owusu");
        let kwame = create_member(&service, "Kwame Boateng");

        pay(&service, &ama, dec!(25.00), ymd(2024, 3, 15));

        let kwame_history = service
            .list_contributions(&kwame, ContributionListQuery::default())
            .unwrap();
        assert!(kwame_history.contributions.is_empty());

        let kwame_march = service.monthly_summary(&kwame, 2024, 3).unwrap();
        assert_eq!(kwame_march.total, Decimal::ZERO);
        assert_eq!(kwame_march.room, dec!(10.00));
    }
}
