use std::fs;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::connection::CsvConnection;
use crate::domain::models::member::Member;
use crate::storage::traits::MemberStorage;

/// Intermediate struct for YAML serialization with string date fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlMember {
    id: String,
    name: String,
    staff_id: String,
    phone_number: String,
    created_at: String,
    updated_at: String,
}

/// File-backed member repository using filesystem discovery: every
/// subdirectory of the base directory containing a `member.yaml` is a member.
#[derive(Clone)]
pub struct MemberRepository {
    connection: Arc<CsvConnection>,
}

impl MemberRepository {
    /// Create a new member repository
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    /// Discover all members by scanning directories
    fn discover_members(&self) -> Result<Vec<Member>> {
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            debug!("Base directory doesn't exist, returning empty member list");
            return Ok(Vec::new());
        }

        let mut members = Vec::new();

        for entry in fs::read_dir(base_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            let dir_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => {
                    warn!("Skipping directory with invalid name: {:?}", path);
                    continue;
                }
            };

            match self.load_member_from_directory(dir_name) {
                Ok(Some(member)) => members.push(member),
                Ok(None) => debug!("Directory {} doesn't contain a member profile", dir_name),
                Err(e) => warn!("Error loading member from directory {}: {}", dir_name, e),
            }
        }

        members.sort_by(|a, b| a.name.cmp(&b.name));

        debug!("Discovered {} members", members.len());
        Ok(members)
    }

    /// Load a member profile from a specific directory
    fn load_member_from_directory(&self, member_id: &str) -> Result<Option<Member>> {
        let yaml_path = self.connection.get_member_profile_path(member_id);

        if !yaml_path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)?;
        let yaml_member: YamlMember = serde_yaml::from_str(&yaml_content)?;

        let member = Member {
            id: yaml_member.id,
            name: yaml_member.name,
            staff_id: yaml_member.staff_id,
            phone_number: yaml_member.phone_number,
            created_at: chrono::DateTime::parse_from_rfc3339(&yaml_member.created_at)
                .map_err(|e| anyhow::anyhow!("Failed to parse created_at: {}", e))?
                .with_timezone(&chrono::Utc),
            updated_at: chrono::DateTime::parse_from_rfc3339(&yaml_member.updated_at)
                .map_err(|e| anyhow::anyhow!("Failed to parse updated_at: {}", e))?
                .with_timezone(&chrono::Utc),
        };

        Ok(Some(member))
    }

    /// Save a member profile to their directory
    fn save_member_to_directory(&self, member: &Member) -> Result<()> {
        let member_dir = self.connection.get_member_directory(&member.id);
        if !member_dir.exists() {
            fs::create_dir_all(&member_dir)?;
        }

        let yaml_member = YamlMember {
            id: member.id.clone(),
            name: member.name.clone(),
            staff_id: member.staff_id.clone(),
            phone_number: member.phone_number.clone(),
            created_at: member.created_at.to_rfc3339(),
            updated_at: member.updated_at.to_rfc3339(),
        };

        let yaml_content = serde_yaml::to_string(&yaml_member)?;
        fs::write(self.connection.get_member_profile_path(&member.id), yaml_content)?;

        Ok(())
    }
}

impl MemberStorage for MemberRepository {
    fn store_member(&self, member: &Member) -> Result<()> {
        self.save_member_to_directory(member)?;
        // Bootstrap the ledger alongside the profile
        self.connection.ensure_contributions_file_exists(&member.id)
    }

    fn get_member(&self, member_id: &str) -> Result<Option<Member>> {
        self.load_member_from_directory(member_id)
    }

    fn list_members(&self) -> Result<Vec<Member>> {
        self.discover_members()
    }

    fn update_member(&self, member: &Member) -> Result<()> {
        self.save_member_to_directory(member)
    }

    fn delete_member(&self, member_id: &str) -> Result<bool> {
        let member_dir = self.connection.get_member_directory(member_id);

        if !self.connection.get_member_profile_path(member_id).exists() {
            return Ok(false);
        }

        fs::remove_dir_all(member_dir)?;
        Ok(true)
    }
}
