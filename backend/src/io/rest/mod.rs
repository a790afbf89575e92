//! # REST API Interface Layer
//!
//! HTTP endpoints for the dues tracker. This layer handles:
//! - Request/response serialization between `shared` DTOs and domain types
//! - Input validation before anything reaches the domain layer
//! - Error translation from `LedgerError` to HTTP status codes
//!
//! Business logic lives in the domain services; handlers here only
//! translate.

pub mod contribution_apis;
pub mod mappers;
pub mod member_apis;

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Router;

use crate::domain::{ContributionService, LedgerError, MemberService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub member_service: MemberService,
    pub contribution_service: ContributionService,
}

impl AppState {
    pub fn new(member_service: MemberService, contribution_service: ContributionService) -> Self {
        Self {
            member_service,
            contribution_service,
        }
    }
}

/// Map a domain error to the HTTP status it should surface as
pub fn error_status(error: &LedgerError) -> StatusCode {
    match error {
        LedgerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        LedgerError::MemberNotFound(_) | LedgerError::RecordNotFound(_) => StatusCode::NOT_FOUND,
        LedgerError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/members",
            post(member_apis::create_member).get(member_apis::list_members),
        )
        .route(
            "/members/:member_id",
            get(member_apis::get_member)
                .put(member_apis::update_member)
                .delete(member_apis::delete_member),
        )
        .route(
            "/members/:member_id/payments",
            post(contribution_apis::record_payment),
        )
        .route(
            "/members/:member_id/contributions",
            get(contribution_apis::list_contributions),
        )
        .route(
            "/members/:member_id/contributions/summary",
            get(contribution_apis::monthly_summary),
        )
        .route(
            "/contributions/:record_id",
            put(contribution_apis::update_contribution)
                .delete(contribution_apis::delete_contribution),
        )
        .with_state(state)
}
