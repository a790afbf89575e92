use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

/// CsvConnection manages file paths and ensures ledger files exist for each
/// member. Member IDs are filesystem-safe slugs, so the ID is the directory
/// name.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new connection rooted at the given base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory.
    /// Honors the DUES_TRACKER_DATA_DIR environment variable.
    pub fn new_default() -> Result<Self> {
        let data_dir = match std::env::var("DUES_TRACKER_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from("dues_data"),
        };
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.clone()
    }

    /// Get the directory path for a member's data
    pub fn get_member_directory(&self, member_id: &str) -> PathBuf {
        self.base_directory.join(member_id)
    }

    /// Get the path of a member's YAML profile file
    pub fn get_member_profile_path(&self, member_id: &str) -> PathBuf {
        self.get_member_directory(member_id).join("member.yaml")
    }

    /// Get the path of a member's contributions ledger file
    pub fn get_contributions_file_path(&self, member_id: &str) -> PathBuf {
        self.get_member_directory(member_id).join("contributions.csv")
    }

    /// Ensure the ledger file exists with its header for the given member
    pub fn ensure_contributions_file_exists(&self, member_id: &str) -> Result<()> {
        let member_dir = self.get_member_directory(member_id);

        if !member_dir.exists() {
            fs::create_dir_all(&member_dir)?;
        }

        let file_path = member_dir.join("contributions.csv");

        if !file_path.exists() {
            let header = "id,member_id,amount,payment_date,receipt_number,notes,created_at\n";
            fs::write(&file_path, header)?;
        }

        Ok(())
    }
}
