//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{User, USER_TABLE};

use crate::repository::Persistable;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
        }
    }
}

impl Persistable for User {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;

    fn table_name() -> &'static str {
        USER_TABLE
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn from_model(model: Model) -> Self {
        User::from(model)
    }

    fn to_active_model(&self) -> ActiveModel {
        ActiveModel::from(self)
    }
}
