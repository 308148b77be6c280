//! User Service Library
//!
//! Data access and use cases for the support app's users: a generic
//! SeaORM-backed repository over a request-scoped persistence context, the
//! user service built on it, and the migrations for its schema.

pub mod config;
pub mod infra;
pub mod persistence;
pub mod repository;
pub mod service;

use common::AppResult;

use crate::config::SupportConfig;
use crate::service::Services;

pub use crate::infra::{Database, MigrateAction};

/// Connect, apply pending migrations and wire the services of one request scope.
pub async fn open_scope(config: &SupportConfig) -> AppResult<Services> {
    let db = Database::connect(&config.database).await?;
    Ok(Services::scoped(db.into_connection()))
}

/// Run a migration command, printing the status list for `Status`.
pub async fn run_migrations(config: &SupportConfig, action: MigrateAction) -> AppResult<()> {
    let db = Database::open(&config.database).await?;
    let states = db.migrate(action).await?;

    if action == MigrateAction::Status {
        for state in states {
            let marker = if state.applied { "[x]" } else { "[ ]" };
            println!("{} {}", marker, state.name);
        }
    }

    Ok(())
}
