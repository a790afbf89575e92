//! Mappers between `shared` DTOs and domain types.

pub mod contribution_mapper;
pub mod member_mapper;
