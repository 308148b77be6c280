//! Base entity contract and audit capability.
//!
//! Every persisted entity exposes a unique identifier. Entities that track
//! who created and last modified them opt into the audit capability by
//! overriding [`BaseEntity::AUDITABLE`] and [`BaseEntity::audit_mut`]; the
//! decision is fixed per concrete type, so repositories branch on a constant
//! instead of inspecting values at runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity with a globally unique identifier assigned at construction.
pub trait BaseEntity {
    /// Whether this entity type carries [`AuditFields`].
    ///
    /// Types that set this to `true` must return `Some` from [`audit_mut`](Self::audit_mut).
    const AUDITABLE: bool = false;

    /// Entity identifier
    fn id(&self) -> Uuid;

    /// Mutable access to the audit fields of an auditable entity
    fn audit_mut(&mut self) -> Option<&mut AuditFields> {
        None
    }
}

/// Created / last-modified bookkeeping for auditable entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFields {
    pub created_by: Uuid,
    pub created: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl AuditFields {
    /// Record creation
    pub fn stamp_created(&mut self, by: Uuid, at: DateTime<Utc>) {
        self.created_by = by;
        self.created = at;
    }

    /// Record a modification
    pub fn stamp_modified(&mut self, by: Uuid, at: DateTime<Utc>) {
        self.last_modified_by = Some(by);
        self.last_modified = Some(at);
    }

    /// Check if the entity was modified after creation
    pub fn is_modified(&self) -> bool {
        self.last_modified.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_audit_fields_are_unset() {
        let audit = AuditFields::default();
        assert!(audit.created_by.is_nil());
        assert!(!audit.is_modified());
    }

    #[test]
    fn test_stamp_created_keeps_modification_empty() {
        let by = Uuid::new_v4();
        let at = Utc::now();
        let mut audit = AuditFields::default();

        audit.stamp_created(by, at);

        assert_eq!(audit.created_by, by);
        assert_eq!(audit.created, at);
        assert_eq!(audit.last_modified_by, None);
    }

    #[test]
    fn test_stamp_modified_overwrites_previous_stamp() {
        let mut audit = AuditFields::default();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        audit.stamp_modified(first, Utc::now());
        let at = Utc::now();
        audit.stamp_modified(second, at);

        assert!(audit.is_modified());
        assert_eq!(audit.last_modified_by, Some(second));
        assert_eq!(audit.last_modified, Some(at));
    }
}
