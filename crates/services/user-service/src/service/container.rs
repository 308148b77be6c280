//! Service Container - composition root for one request scope.
//!
//! SOLID (DIP): Depends on service traits, not implementations.
//!
//! Every collaborator is handed in through a constructor; there is no
//! global registry. Build one container per request so the persistence
//! context and repositories are never shared across requests.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use domain::User;

use super::{UserManager, UserService};
use crate::persistence::SupportContext;
use crate::repository::{EntityRepository, Repository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a service container from already built services
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }

    /// Wire a fresh persistence context, repositories and services.
    pub fn scoped(db: DatabaseConnection) -> Self {
        let ctx = Arc::new(SupportContext::new(db));
        let user_repo: Arc<dyn Repository<User>> = Arc::new(EntityRepository::<User>::new(ctx));
        let user_service = Arc::new(UserManager::new(user_repo));

        Self { user_service }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockUserService;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_container_hands_out_injected_service() {
        let user = User::new("Ada", "Lovelace");
        let id = user.id;

        let mut service = MockUserService::new();
        service
            .expect_get_user_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let services = Services::new(Arc::new(service));
        let found = services.users().get_user_by_id(id).await.unwrap();

        assert_eq!(found.map(|u| u.id), Some(id));
    }

    #[tokio::test]
    async fn test_scoped_container_serves_gender_options_without_storage() {
        let services = Services::scoped(DatabaseConnection::Disconnected);

        let options = services.users().gender_options(Some("Male"));

        assert_eq!(options.len(), 2);
        assert!(options[0].is_selected);
        assert!(!options[1].is_selected);
    }

    #[test]
    fn test_mock_container() {
        let mut container = MockServiceContainer::new();
        container
            .expect_users()
            .returning(|| Arc::new(MockUserService::new()));

        let _users = container.users();
    }
}
