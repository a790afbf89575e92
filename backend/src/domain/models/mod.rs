pub mod contribution;
pub mod member;
