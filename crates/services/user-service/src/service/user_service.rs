//! User service - Handles user-related use cases.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::AppResult;
use domain::{gender_options, GenderOption, User};

use crate::repository::Repository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID, `None` when it does not exist
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert and commit a user.
    ///
    /// Returns the entity that was passed in, not a reloaded copy.
    async fn insert_user(&self, user: User) -> AppResult<User>;

    /// Gender dropdown options with `selected` marked
    fn gender_options<'a>(&self, selected: Option<&'a str>) -> Vec<GenderOption>;
}

/// Concrete implementation of UserService using the generic repository.
pub struct UserManager {
    repo: Arc<dyn Repository<User>>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn Repository<User>>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.repo.get_by_id(id).await
    }

    async fn insert_user(&self, mut user: User) -> AppResult<User> {
        self.repo.insert(&mut user).await?;
        let affected = self.repo.save().await?;

        tracing::info!(user_id = %user.id, rows = affected, "User inserted");
        Ok(user)
    }

    fn gender_options<'a>(&self, selected: Option<&'a str>) -> Vec<GenderOption> {
        gender_options(selected)
    }
}
