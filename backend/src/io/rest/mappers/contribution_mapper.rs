use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{
    ContributionListResponse, ContributionRecord, ContributionResponse, MonthlySummaryResponse,
    RecordPaymentRequest, RecordPaymentResponse, UpdateContributionRequest,
};

use crate::domain::commands::contributions::{
    ContributionListResult, MonthlySummaryResult, RecordPaymentCommand, RecordPaymentResult,
    UpdateContributionCommand, UpdateContributionResult,
};
use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::models::contribution::Contribution;

/// Mapper between shared contribution DTOs and domain types.
///
/// All amount/date validation for incoming payment requests happens here,
/// before anything reaches the domain layer: amounts must be positive with
/// at most two decimal places, dates must be valid YYYY-MM-DD.
pub struct ContributionMapper;

impl ContributionMapper {
    /// Converts a domain Contribution model to a shared DTO.
    pub fn to_dto(domain: Contribution) -> ContributionRecord {
        ContributionRecord {
            id: domain.id,
            member_id: domain.member_id,
            amount: domain.amount,
            payment_date: domain.payment_date.format("%Y-%m-%d").to_string(),
            receipt_number: domain.receipt_number,
            notes: domain.notes,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    fn parse_date(raw: &str) -> LedgerResult<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            LedgerError::InvalidInput(format!("Invalid date '{}'. Expected YYYY-MM-DD", raw))
        })
    }

    fn validate_amount(amount: Decimal) -> LedgerResult<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(
                "Payment amount must be greater than zero".to_string(),
            ));
        }
        if amount.normalize().scale() > 2 {
            return Err(LedgerError::InvalidInput(
                "Payment amount cannot have more than 2 decimal places".to_string(),
            ));
        }
        Ok(amount)
    }

    /// Build a payment command from the request, validating amount and date.
    pub fn payment_command(
        member_id: &str,
        request: RecordPaymentRequest,
    ) -> LedgerResult<RecordPaymentCommand> {
        let total_amount = Self::validate_amount(request.amount)?;
        let payment_date = Self::parse_date(&request.payment_date)?;

        Ok(RecordPaymentCommand {
            member_id: member_id.to_string(),
            total_amount,
            payment_date,
            notes: request.notes.filter(|n| !n.trim().is_empty()),
        })
    }

    pub fn to_payment_response(result: RecordPaymentResult) -> RecordPaymentResponse {
        RecordPaymentResponse {
            records: result.records.into_iter().map(Self::to_dto).collect(),
            total_recorded: result.total_recorded,
            success_message: result.success_message,
        }
    }

    pub fn to_list_response(result: ContributionListResult) -> ContributionListResponse {
        ContributionListResponse {
            contributions: result.contributions.into_iter().map(Self::to_dto).collect(),
            available_years: result.available_years,
        }
    }

    pub fn to_summary_response(result: MonthlySummaryResult) -> MonthlySummaryResponse {
        MonthlySummaryResponse {
            year: result.year,
            month: result.month,
            total: result.total,
            room: result.room,
            ceiling: result.ceiling,
        }
    }

    /// Build a ledger-edit command from the request.
    pub fn update_command(
        record_id: &str,
        request: UpdateContributionRequest,
    ) -> LedgerResult<UpdateContributionCommand> {
        let amount = match request.amount {
            Some(amount) => Some(Self::validate_amount(amount)?),
            None => None,
        };
        let payment_date = match request.payment_date.as_deref() {
            Some(raw) => Some(Self::parse_date(raw)?),
            None => None,
        };

        Ok(UpdateContributionCommand {
            record_id: record_id.to_string(),
            amount,
            payment_date,
            notes: request.notes,
        })
    }

    pub fn to_update_response(result: UpdateContributionResult) -> ContributionResponse {
        ContributionResponse {
            contribution: Self::to_dto(result.contribution),
            success_message: result.success_message,
        }
    }
}
