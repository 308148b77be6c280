//! Application services layer - Use cases and composition.
//!
//! Services depend on repository traits, never on SeaORM directly.

pub mod container;
mod user_service;

pub use container::{ServiceContainer, Services};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
