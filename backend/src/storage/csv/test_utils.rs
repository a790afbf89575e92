//! Test utilities for the file-backed storage layer.
//!
//! Provides RAII-based cleanup so test data is removed even if tests panic.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tempfile::TempDir;

use super::connection::CsvConnection;
use super::contribution_repository::ContributionRepository;
use super::member_repository::MemberRepository;
use crate::domain::models::member::Member;
use crate::storage::traits::MemberStorage;

/// Test environment with a temporary data directory that is cleaned up when
/// the environment is dropped.
pub struct TestEnvironment {
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Test helper wiring repository instances to a fresh environment
pub struct TestHelper {
    pub env: TestEnvironment,
    pub member_repo: MemberRepository,
    pub contribution_repo: ContributionRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let member_repo = MemberRepository::new(Arc::new(env.connection.clone()));
        let contribution_repo = ContributionRepository::new(env.connection.clone());

        Ok(Self {
            env,
            member_repo,
            contribution_repo,
        })
    }

    /// Create and store a member with the given name
    pub fn create_test_member(&self, name: &str) -> Result<Member> {
        let member = Member {
            id: Member::generate_id(name),
            name: name.to_string(),
            staff_id: "STF-000".to_string(),
            phone_number: "0244000000".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        self.member_repo.store_member(&member)?;
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
            // Environment dropped here
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn test_helper_creates_member() -> Result<()> {
        let helper = TestHelper::new()?;

        let member = helper.create_test_member("Test Member")?;
        assert_eq!(member.id, "test_member");

        let retrieved = helper.member_repo.get_member(&member.id)?;
        assert!(retrieved.is_some());
        Ok(())
    }
}
