use shared::{
    CreateMemberRequest, Member as SharedMember, MemberListResponse, UpdateMemberRequest,
};

use crate::domain::commands::members::{CreateMemberCommand, UpdateMemberCommand};
use crate::domain::models::member::Member as DomainMember;

/// Mapper between shared member DTOs and domain member models.
pub struct MemberMapper;

impl MemberMapper {
    /// Converts a domain Member model to a shared Member DTO.
    pub fn to_dto(domain: DomainMember) -> SharedMember {
        SharedMember {
            id: domain.id,
            name: domain.name,
            staff_id: domain.staff_id,
            phone_number: domain.phone_number,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_list_dto(members: Vec<DomainMember>) -> MemberListResponse {
        MemberListResponse {
            members: members.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn create_command(request: CreateMemberRequest) -> CreateMemberCommand {
        CreateMemberCommand {
            name: request.name,
            staff_id: request.staff_id,
            phone_number: request.phone_number,
        }
    }

    pub fn update_command(member_id: &str, request: UpdateMemberRequest) -> UpdateMemberCommand {
        UpdateMemberCommand {
            member_id: member_id.to_string(),
            name: request.name,
            staff_id: request.staff_id,
            phone_number: request.phone_number,
        }
    }
}
