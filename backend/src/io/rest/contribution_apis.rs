//! # REST API for Dues Contributions
//!
//! Endpoints for submitting payments, browsing a member's ledger, and
//! administrative ledger edits.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use shared::{DeleteContributionResponse, RecordPaymentRequest, UpdateContributionRequest};

use super::mappers::contribution_mapper::ContributionMapper;
use super::{error_status, AppState};
use crate::domain::commands::contributions::ContributionListQuery;

/// Query parameters for the contribution list endpoint
#[derive(Deserialize, Debug)]
pub struct ContributionListParams {
    pub year: Option<i32>,
    pub limit: Option<u32>,
}

/// Query parameters for the monthly summary endpoint
#[derive(Deserialize, Debug)]
pub struct MonthlySummaryParams {
    pub year: i32,
    pub month: u32,
}

/// Submit a dues payment for a member.
///
/// The amount may span several months; the response lists every ledger
/// record the payment produced, in chronological order.
pub async fn record_payment(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(request): Json<RecordPaymentRequest>,
) -> impl IntoResponse {
    info!("POST /api/members/{}/payments - request: {:?}", member_id, request);

    let command = match ContributionMapper::payment_command(&member_id, request) {
        Ok(command) => command,
        Err(e) => {
            error!("Rejected payment submission: {}", e);
            return (error_status(&e), e.to_string()).into_response();
        }
    };

    match state.contribution_service.record_payment(command) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ContributionMapper::to_payment_response(result)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to record payment: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// A member's payment history
pub async fn list_contributions(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Query(params): Query<ContributionListParams>,
) -> impl IntoResponse {
    info!(
        "GET /api/members/{}/contributions - params: {:?}",
        member_id, params
    );

    let query = ContributionListQuery {
        year: params.year,
        limit: params.limit,
    };

    match state.contribution_service.list_contributions(&member_id, query) {
        Ok(result) => (
            StatusCode::OK,
            Json(ContributionMapper::to_list_response(result)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list contributions: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Monthly total and remaining room for a member
pub async fn monthly_summary(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Query(params): Query<MonthlySummaryParams>,
) -> impl IntoResponse {
    info!(
        "GET /api/members/{}/contributions/summary - params: {:?}",
        member_id, params
    );

    match state
        .contribution_service
        .monthly_summary(&member_id, params.year, params.month)
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ContributionMapper::to_summary_response(result)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to build monthly summary: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Administrative edit of a ledger record
pub async fn update_contribution(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Json(request): Json<UpdateContributionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/contributions/{} - request: {:?}", record_id, request);

    let command = match ContributionMapper::update_command(&record_id, request) {
        Ok(command) => command,
        Err(e) => {
            error!("Rejected contribution update: {}", e);
            return (error_status(&e), e.to_string()).into_response();
        }
    };

    match state.contribution_service.update_contribution(command) {
        Ok(result) => (
            StatusCode::OK,
            Json(ContributionMapper::to_update_response(result)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update contribution: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Delete a ledger record
pub async fn delete_contribution(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/contributions/{}", record_id);

    match state.contribution_service.delete_contribution(&record_id) {
        Ok(true) => (
            StatusCode::OK,
            Json(DeleteContributionResponse {
                deleted: true,
                success_message: "Contribution deleted".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Contribution record not found").into_response(),
        Err(e) => {
            error!("Failed to delete contribution: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
