//! # REST API for Member Management
//!
//! Endpoints for registering, retrieving, updating, and deleting members.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use shared::{CreateMemberRequest, UpdateMemberRequest};

use super::mappers::member_mapper::MemberMapper;
use super::{error_status, AppState};
use crate::domain::commands::members::MemberListQuery;

/// Query parameters for the member list endpoint
#[derive(Deserialize, Debug)]
pub struct MemberListParams {
    pub q: Option<String>,
}

/// Register a new member
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> impl IntoResponse {
    info!("POST /api/members - request: {:?}", request);

    match state
        .member_service
        .create_member(MemberMapper::create_command(request))
    {
        Ok(result) => (StatusCode::CREATED, Json(MemberMapper::to_dto(result.member))).into_response(),
        Err(e) => {
            error!("Failed to create member: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Get a member by ID
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/members/{}", member_id);

    match state.member_service.get_member(&member_id) {
        Ok(Some(member)) => (StatusCode::OK, Json(MemberMapper::to_dto(member))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Member not found").into_response(),
        Err(e) => {
            error!("Failed to get member: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// List members, optionally filtered by name/staff-id substring
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<MemberListParams>,
) -> impl IntoResponse {
    info!("GET /api/members - params: {:?}", params);

    let query = MemberListQuery { search: params.q };

    match state.member_service.list_members(query) {
        Ok(result) => (
            StatusCode::OK,
            Json(MemberMapper::to_list_dto(result.members)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list members: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Update a member's profile
pub async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(request): Json<UpdateMemberRequest>,
) -> impl IntoResponse {
    info!("PUT /api/members/{} - request: {:?}", member_id, request);

    match state
        .member_service
        .update_member(MemberMapper::update_command(&member_id, request))
    {
        Ok(member) => (StatusCode::OK, Json(MemberMapper::to_dto(member))).into_response(),
        Err(e) => {
            error!("Failed to update member: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Delete a member and their ledger
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/members/{}", member_id);

    match state.member_service.delete_member(&member_id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Member not found").into_response(),
        Err(e) => {
            error!("Failed to delete member: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
