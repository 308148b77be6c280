//! Binding between domain entities and their SeaORM representation.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, EntityTrait, FromQueryResult, IntoActiveModel,
    ModelTrait,
};

use domain::BaseEntity;

/// Domain entity that can be stored through [`EntityRepository`](super::EntityRepository).
///
/// Ties the entity to its SeaORM `Entity` / `Model` / `ActiveModel` triple and
/// names the identifier column.
pub trait Persistable: BaseEntity + Clone + Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model> + 'static;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;

    /// Primary key column holding [`BaseEntity::id`]
    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    /// Build the domain entity from a loaded row
    fn from_model(model: Self::Model) -> Self;

    /// Active model with every column set from this entity
    fn to_active_model(&self) -> Self::ActiveModel;

    /// Table the entity is stored in, as declared on the SeaORM entity
    fn table_name() -> &'static str;
}
