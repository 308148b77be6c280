//! Migration tests against an in-memory SQLite database.

mod support;

use user_service_lib::infra::{Database, MigrateAction, MigrationState};

use support::in_memory_config;

fn all_applied(states: &[MigrationState]) -> bool {
    !states.is_empty() && states.iter().all(|s| s.applied)
}

#[tokio::test]
async fn test_connect_applies_all_migrations() {
    let db = Database::connect(&in_memory_config()).await.unwrap();

    let states = db.migrate(MigrateAction::Status).await.unwrap();

    assert!(all_applied(&states));
}

#[tokio::test]
async fn test_open_leaves_schema_untouched() {
    let db = Database::open(&in_memory_config()).await.unwrap();

    let states = db.migrate(MigrateAction::Status).await.unwrap();

    assert!(!states.is_empty());
    assert!(states.iter().all(|s| !s.applied));
}

#[tokio::test]
async fn test_down_reverts_last_migration_and_fresh_reapplies() {
    let db = Database::open(&in_memory_config()).await.unwrap();

    assert!(all_applied(&db.migrate(MigrateAction::Up).await.unwrap()));

    let states = db.migrate(MigrateAction::Down).await.unwrap();
    assert_eq!(
        states.last(),
        Some(&MigrationState {
            name: "m20240101_000001_create_user_table".to_string(),
            applied: false,
        })
    );

    assert!(all_applied(&db.migrate(MigrateAction::Fresh).await.unwrap()));
}
