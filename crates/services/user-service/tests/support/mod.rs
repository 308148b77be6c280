//! Shared fixtures for the integration tests.
//!
//! Every test opens its own migrated in-memory SQLite database. The
//! `ticket` table exists only here: it backs an auditable entity so the
//! audit paths of the generic repository can be exercised.

#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, RelationDef, Schema};
use uuid::Uuid;

use common::DatabaseConfig;
use domain::{AuditFields, BaseEntity};
use user_service_lib::infra::Database;
use user_service_lib::persistence::SupportContext;
use user_service_lib::repository::entities::user;
use user_service_lib::repository::{EntityRepository, Persistable};

pub const TICKET_TABLE: &str = "ticket";

/// Auditable entity used only by the tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub audit: AuditFields,
}

impl Ticket {
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            audit: AuditFields::default(),
        }
    }
}

impl BaseEntity for Ticket {
    const AUDITABLE: bool = true;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit_mut(&mut self) -> Option<&mut AuditFields> {
        Some(&mut self.audit)
    }
}

pub mod ticket {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "ticket")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub title: String,
        pub created_by: Uuid,
        pub created: DateTimeUtc,
        pub last_modified_by: Option<Uuid>,
        pub last_modified: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl Persistable for Ticket {
    type Entity = ticket::Entity;
    type Model = ticket::Model;
    type ActiveModel = ticket::ActiveModel;

    fn id_column() -> ticket::Column {
        ticket::Column::Id
    }

    fn from_model(model: ticket::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            audit: AuditFields {
                created_by: model.created_by,
                created: model.created,
                last_modified_by: model.last_modified_by,
                last_modified: model.last_modified,
            },
        }
    }

    fn to_active_model(&self) -> ticket::ActiveModel {
        use sea_orm::Set;

        ticket::ActiveModel {
            id: Set(self.id),
            title: Set(self.title.clone()),
            created_by: Set(self.audit.created_by),
            created: Set(self.audit.created),
            last_modified_by: Set(self.audit.last_modified_by),
            last_modified: Set(self.audit.last_modified),
        }
    }

    fn table_name() -> &'static str {
        TICKET_TABLE
    }
}

/// Throwaway in-memory SQLite database.
///
/// The pool is pinned to one connection since every SQLite memory
/// connection opens its own database.
pub fn in_memory_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    }
}

/// `user` -> `ticket` over `ticket.created_by`, with no foreign key in the schema
pub fn tickets_created() -> RelationDef {
    let creator: RelationDef = ticket::Entity::belongs_to(user::Entity)
        .from(ticket::Column::CreatedBy)
        .to(user::Column::Id)
        .into();
    creator.rev()
}

/// Migrated in-memory database with the test-only `ticket` table
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect(&in_memory_config())
        .await
        .expect("in-memory database")
        .into_connection();

    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(ticket::Entity);
    db.execute(backend.build(&stmt))
        .await
        .expect("create ticket table");

    db
}

/// Fresh request scope over `db`
pub fn context(db: &DatabaseConnection) -> Arc<SupportContext> {
    Arc::new(SupportContext::new(db.clone()))
}

pub fn user_repo(ctx: &Arc<SupportContext>) -> EntityRepository<domain::User> {
    EntityRepository::new(ctx.clone())
}

pub fn ticket_repo(ctx: &Arc<SupportContext>) -> EntityRepository<Ticket> {
    EntityRepository::new(ctx.clone())
}
