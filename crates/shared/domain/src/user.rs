//! User domain entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::BaseEntity;

/// User domain entity
///
/// Users are not auditable: inserting or deleting them never touches audit fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// First and last name separated by a space
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            _ => self.last_name.clone(),
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl BaseEntity for User {
    fn id(&self) -> Uuid {
        self.id
    }
}
