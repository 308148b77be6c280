//! Database connection and schema migrations.

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use common::DatabaseConfig;

use super::migrations::Migrator;

/// Migration action requested from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// One known migration and whether it is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Pooled connection to the support app database.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool without touching the schema.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::debug!(
            max = config.max_connections,
            min = config.min_connections,
            "Database pool opened"
        );

        Ok(Self { connection })
    }

    /// Open the pool and apply pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;
        db.migrate(MigrateAction::Up).await?;
        Ok(db)
    }

    /// Hand the connection to a request scope
    pub fn into_connection(self) -> DatabaseConnection {
        self.connection
    }

    /// Run `action`, then report the state of every known migration.
    ///
    /// `Down` reverts only the most recent migration; `Fresh` drops every
    /// table before reapplying.
    pub async fn migrate(&self, action: MigrateAction) -> Result<Vec<MigrationState>, DbErr> {
        match action {
            MigrateAction::Up => Migrator::up(&self.connection, None).await?,
            MigrateAction::Down => Migrator::down(&self.connection, Some(1)).await?,
            MigrateAction::Fresh => Migrator::fresh(&self.connection).await?,
            MigrateAction::Status => {}
        }

        let states: Vec<MigrationState> = Migrator::get_migration_with_status(&self.connection)
            .await?
            .into_iter()
            .map(|m| MigrationState {
                name: m.name().to_string(),
                applied: matches!(m.status(), MigrationStatus::Applied),
            })
            .collect();

        tracing::info!(
            ?action,
            applied = states.iter().filter(|s| s.applied).count(),
            total = states.len(),
            "Migrations checked"
        );
        Ok(states)
    }
}
