//! Domain model for an association member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered member of the association.
///
/// The member's `id` is a filesystem-safe slug of their name and doubles as
/// the name of the directory holding their ledger data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub staff_id: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Derive a stable identifier from a member name.
    /// Converts "Emma Mensah" -> "emma_mensah", "José María" -> "jose_maria".
    pub fn generate_id(name: &str) -> String {
        let mapped = name
            .chars()
            .map(|c| {
                if c.is_whitespace() {
                    '_'
                } else {
                    match c {
                        'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
                        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
                        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
                        'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
                        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
                        'ñ' | 'Ñ' => 'n',
                        'ç' | 'Ç' => 'c',
                        c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
                        _ => '_',
                    }
                }
            })
            .collect::<String>();

        // Collapse runs of underscores and trim the ends
        let mut collapsed = String::new();
        let mut last_was_underscore = false;
        for c in mapped.chars() {
            if c == '_' {
                if !last_was_underscore {
                    collapsed.push('_');
                }
                last_was_underscore = true;
            } else {
                collapsed.push(c);
                last_was_underscore = false;
            }
        }

        collapsed.trim_matches('_').to_string()
    }
}
