use std::sync::Arc;

use log::info;

use crate::domain::commands::members::{
    CreateMemberCommand, CreateMemberResult, MemberListQuery, MemberListResult,
    UpdateMemberCommand,
};
use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::models::member::Member;
use crate::storage::csv::{CsvConnection, MemberRepository};
use crate::storage::traits::MemberStorage;

/// Service for the member registry.
///
/// Registration and profile edits only; dues are handled by the
/// contribution service, which consults this registry for the
/// member-must-exist precondition.
#[derive(Clone)]
pub struct MemberService {
    member_repository: MemberRepository,
}

impl MemberService {
    /// Create a new MemberService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        let member_repository = MemberRepository::new(csv_conn);
        Self { member_repository }
    }

    /// Register a new member
    pub fn create_member(&self, command: CreateMemberCommand) -> LedgerResult<CreateMemberResult> {
        info!("Creating member: {:?}", command);

        let name = command.name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidInput("Member name cannot be empty".to_string()));
        }
        if command.staff_id.trim().is_empty() {
            return Err(LedgerError::InvalidInput("Staff ID cannot be empty".to_string()));
        }

        let id = Member::generate_id(name);
        if id.is_empty() {
            return Err(LedgerError::InvalidInput(format!(
                "Member name '{}' contains no usable characters",
                name
            )));
        }

        if self.member_repository.get_member(&id)?.is_some() {
            return Err(LedgerError::InvalidInput(format!(
                "A member with id '{}' already exists",
                id
            )));
        }

        let now = chrono::Utc::now();
        let member = Member {
            id,
            name: name.to_string(),
            staff_id: command.staff_id.trim().to_string(),
            phone_number: command.phone_number.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.member_repository.store_member(&member)?;

        info!("Created member '{}' ({})", member.name, member.id);

        Ok(CreateMemberResult {
            member,
            success_message: "Member registered successfully".to_string(),
        })
    }

    /// Get a member by ID
    pub fn get_member(&self, member_id: &str) -> LedgerResult<Option<Member>> {
        Ok(self.member_repository.get_member(member_id)?)
    }

    /// List members, optionally filtered by a name/staff-id substring
    pub fn list_members(&self, query: MemberListQuery) -> LedgerResult<MemberListResult> {
        let mut members = self.member_repository.list_members()?;

        if let Some(search) = query.search.as_deref() {
            let needle = search.to_lowercase();
            members.retain(|m| {
                m.name.to_lowercase().contains(&needle)
                    || m.staff_id.to_lowercase().contains(&needle)
            });
        }

        info!("Listed {} members", members.len());
        Ok(MemberListResult { members })
    }

    /// Update a member's profile fields
    pub fn update_member(&self, command: UpdateMemberCommand) -> LedgerResult<Member> {
        let mut member = self
            .member_repository
            .get_member(&command.member_id)?
            .ok_or_else(|| LedgerError::MemberNotFound(command.member_id.clone()))?;

        // The id stays stable even when the display name changes; it anchors
        // the member's ledger directory.
        if let Some(name) = command.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(LedgerError::InvalidInput("Member name cannot be empty".to_string()));
            }
            member.name = name;
        }
        if let Some(staff_id) = command.staff_id {
            member.staff_id = staff_id.trim().to_string();
        }
        if let Some(phone_number) = command.phone_number {
            member.phone_number = phone_number.trim().to_string();
        }
        member.updated_at = chrono::Utc::now();

        self.member_repository.update_member(&member)?;

        info!("Updated member '{}'", member.id);
        Ok(member)
    }

    /// Delete a member and their ledger
    pub fn delete_member(&self, member_id: &str) -> LedgerResult<bool> {
        let deleted = self.member_repository.delete_member(member_id)?;
        if deleted {
            info!("Deleted member '{}'", member_id);
        }
        Ok(deleted)
    }
}
