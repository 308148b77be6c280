//! Generic entity repository.
//!
//! One implementation serves every [`Persistable`] entity type. Reads go
//! straight to the database; writes are staged on the shared
//! [`SupportContext`] and only reach the store on [`Repository::save`].

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationDef, Select,
};
use uuid::Uuid;

use common::{AppError, AppResult};

use super::paged_list::{PageRequest, PagedList};
use super::persistable::Persistable;
use crate::persistence::{ChangeKind, StagedChange, SupportContext};

/// SeaORM entity of a persistable type
pub type EntityOf<T> = <T as Persistable>::Entity;

/// Column enum of a persistable type
pub type ColumnOf<T> = <EntityOf<T> as EntityTrait>::Column;

/// Ordering applied in sequence, first entry is the primary sort key
pub type OrderBy<T> = Vec<(ColumnOf<T>, Order)>;

/// Caller-supplied reshaping of the base query before paging
pub type QueryTransform<T> = Box<dyn FnOnce(Select<EntityOf<T>>) -> Select<EntityOf<T>> + Send>;

/// Data access over one entity type.
///
/// Absent arguments to mutations fail with [`AppError::InvalidArgument`]
/// before any storage access. Lookups by key return `None` when nothing
/// matches. Store errors are returned unchanged.
#[async_trait]
pub trait Repository<T: Persistable>: Send + Sync {
    /// Load every entity matching `filter`, sorted by `order_by`.
    ///
    /// Each relation in `includes` is LEFT JOINed so filters can reference
    /// the related table's columns. Every matching entity is returned once.
    async fn get(
        &self,
        filter: Option<Condition>,
        order_by: OrderBy<T>,
        includes: Vec<RelationDef>,
    ) -> AppResult<Vec<T>>;

    /// Build a lazy query; nothing runs until the caller executes it.
    fn query(&self, filter: Option<Condition>, order_by: OrderBy<T>) -> Select<EntityOf<T>>;

    /// First entity matching `filter`, if any
    async fn get_first_or_default(
        &self,
        filter: Option<Condition>,
        includes: Vec<RelationDef>,
    ) -> AppResult<Option<T>>;

    /// Entity by identifier, if it exists
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<T>>;

    /// Every entity of this type
    async fn get_all(&self) -> AppResult<Vec<T>>;

    /// Entities for `ids`, in the order of `ids`.
    ///
    /// Unknown ids are skipped and repeated ids yield the entity once.
    async fn get_by_ids(&self, ids: Option<&[Uuid]>) -> AppResult<Vec<T>>;

    /// One page of the (optionally transformed) entity set.
    ///
    /// With `count_only` the page stays empty and only the total is queried.
    async fn get_all_paged(
        &self,
        transform: Option<QueryTransform<T>>,
        page: PageRequest,
    ) -> AppResult<PagedList<T>>;

    /// Total number of stored entities
    async fn get_count(&self) -> AppResult<u64>;

    /// Stage an insert. Auditable entities get their creation stamp here.
    async fn insert(&self, entity: &mut T) -> AppResult<()>;

    /// Insert and commit each entity in turn.
    ///
    /// Every entity is saved on its own: when a commit fails, earlier
    /// entities stay committed and later ones are not attempted.
    async fn insert_many(&self, entities: Option<&mut [T]>) -> AppResult<()>;

    /// Stage removal of one entity
    async fn delete(&self, entity: Option<&T>) -> AppResult<()>;

    /// Remove a list of entities.
    ///
    /// For auditable entity types nothing is removed: each entity gets a
    /// modification stamp which is saved on its own. Other types are staged
    /// for removal.
    async fn delete_many(&self, entities: Option<&mut [T]>) -> AppResult<()>;

    /// Stage removal of every entity matching `predicate`
    async fn delete_where(&self, predicate: Option<Condition>) -> AppResult<()>;

    /// Stage a full-row update; audit fields are left as they are.
    async fn update(&self, entity: &T) -> AppResult<()>;

    /// Commit every staged change in one transaction, returning affected rows.
    async fn save(&self) -> AppResult<u64>;
}

/// [`Repository`] implementation backed by SeaORM.
pub struct EntityRepository<T> {
    ctx: Arc<SupportContext>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Persistable> EntityRepository<T> {
    /// Create a repository bound to a request's persistence context
    pub fn new(ctx: Arc<SupportContext>) -> Self {
        Self {
            ctx,
            _entity: PhantomData,
        }
    }

    /// Persistence context this repository stages changes on
    pub fn context(&self) -> &Arc<SupportContext> {
        &self.ctx
    }

    fn with_includes(
        mut select: Select<EntityOf<T>>,
        includes: Vec<RelationDef>,
    ) -> Select<EntityOf<T>> {
        if includes.is_empty() {
            return select;
        }

        for relation in includes {
            select = select.join(JoinType::LeftJoin, relation);
        }
        // One row per root entity, however many related rows join
        select.distinct()
    }

    async fn stage_insert(&self, entity: &T) {
        let stmt = T::Entity::insert(entity.to_active_model());
        let change = StagedChange::new(ChangeKind::Insert, T::table_name(), entity.id(), move |txn| {
            Box::pin(async move { stmt.exec_without_returning(txn).await })
        });
        self.ctx.stage(change).await;
    }

    async fn stage_update(&self, entity: &T) {
        let stmt = T::Entity::update_many()
            .set(entity.to_active_model())
            .filter(T::id_column().eq(entity.id()));
        let change = StagedChange::new(ChangeKind::Update, T::table_name(), entity.id(), move |txn| {
            Box::pin(async move { stmt.exec(txn).await.map(|r| r.rows_affected) })
        });
        self.ctx.stage(change).await;
    }

    async fn stage_delete(&self, id: Uuid) {
        let stmt = T::Entity::delete_many().filter(T::id_column().eq(id));
        let change = StagedChange::new(ChangeKind::Delete, T::table_name(), id, move |txn| {
            Box::pin(async move { stmt.exec(txn).await.map(|r| r.rows_affected) })
        });
        self.ctx.stage(change).await;
    }
}

#[async_trait]
impl<T: Persistable> Repository<T> for EntityRepository<T> {
    async fn get(
        &self,
        filter: Option<Condition>,
        order_by: OrderBy<T>,
        includes: Vec<RelationDef>,
    ) -> AppResult<Vec<T>> {
        let select = Self::with_includes(self.query(filter, order_by), includes);
        let models = select
            .all(self.ctx.connection())
            .await
            .map_err(AppError::from)?;

        tracing::debug!(table = T::table_name(), rows = models.len(), "Loaded entities");
        Ok(models.into_iter().map(T::from_model).collect())
    }

    fn query(&self, filter: Option<Condition>, order_by: OrderBy<T>) -> Select<EntityOf<T>> {
        let mut select = T::Entity::find();

        if let Some(filter) = filter {
            select = select.filter(filter);
        }
        for (column, order) in order_by {
            select = select.order_by(column, order);
        }

        select
    }

    async fn get_first_or_default(
        &self,
        filter: Option<Condition>,
        includes: Vec<RelationDef>,
    ) -> AppResult<Option<T>> {
        let select = Self::with_includes(self.query(filter, Vec::new()), includes);
        let model = select
            .one(self.ctx.connection())
            .await
            .map_err(AppError::from)?;

        Ok(model.map(T::from_model))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<T>> {
        let model = T::Entity::find()
            .filter(T::id_column().eq(id))
            .one(self.ctx.connection())
            .await
            .map_err(AppError::from)?;

        Ok(model.map(T::from_model))
    }

    async fn get_all(&self) -> AppResult<Vec<T>> {
        let models = T::Entity::find()
            .all(self.ctx.connection())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(T::from_model).collect())
    }

    async fn get_by_ids(&self, ids: Option<&[Uuid]>) -> AppResult<Vec<T>> {
        let ids = match ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Ok(Vec::new()),
        };

        let models = T::Entity::find()
            .filter(T::id_column().is_in(ids.iter().copied()))
            .all(self.ctx.connection())
            .await
            .map_err(AppError::from)?;

        let mut found: HashMap<Uuid, T> = models
            .into_iter()
            .map(T::from_model)
            .map(|entity| (entity.id(), entity))
            .collect();

        // Sort by the passed identifiers
        let sorted: Vec<T> = ids.iter().filter_map(|id| found.remove(id)).collect();

        tracing::debug!(
            table = T::table_name(),
            requested = ids.len(),
            found = sorted.len(),
            "Loaded entities by ids"
        );
        Ok(sorted)
    }

    async fn get_all_paged(
        &self,
        transform: Option<QueryTransform<T>>,
        page: PageRequest,
    ) -> AppResult<PagedList<T>> {
        let select = match transform {
            Some(transform) => transform(T::Entity::find()),
            None => T::Entity::find(),
        };

        let total = select
            .clone()
            .count(self.ctx.connection())
            .await
            .map_err(AppError::from)?;

        if page.count_only {
            return Ok(PagedList::new(Vec::new(), page.index, page.size, total));
        }

        let models = select
            .offset(page.offset())
            .limit(page.effective_size())
            .all(self.ctx.connection())
            .await
            .map_err(AppError::from)?;

        let items = models.into_iter().map(T::from_model).collect();
        Ok(PagedList::new(items, page.index, page.size, total))
    }

    async fn get_count(&self) -> AppResult<u64> {
        T::Entity::find()
            .count(self.ctx.connection())
            .await
            .map_err(Into::into)
    }

    async fn insert(&self, entity: &mut T) -> AppResult<()> {
        if T::AUDITABLE {
            // Creator is the entity's own id: no acting user is known here.
            let id = entity.id();
            if let Some(audit) = entity.audit_mut() {
                audit.stamp_created(id, Utc::now());
            }
        }

        self.stage_insert(entity).await;
        Ok(())
    }

    async fn insert_many(&self, entities: Option<&mut [T]>) -> AppResult<()> {
        let entities = entities.ok_or_else(|| AppError::invalid_argument("entities"))?;

        for entity in entities.iter_mut() {
            self.insert(entity).await?;
            self.save().await?;
        }

        tracing::debug!(
            table = T::table_name(),
            count = entities.len(),
            "Inserted entities one at a time"
        );
        Ok(())
    }

    async fn delete(&self, entity: Option<&T>) -> AppResult<()> {
        let entity = entity.ok_or_else(|| AppError::invalid_argument("entity"))?;

        self.stage_delete(entity.id()).await;
        Ok(())
    }

    async fn delete_many(&self, entities: Option<&mut [T]>) -> AppResult<()> {
        let entities = entities.ok_or_else(|| AppError::invalid_argument("entities"))?;

        if !T::AUDITABLE {
            for entity in entities.iter() {
                self.stage_delete(entity.id()).await;
            }
            return Ok(());
        }

        // Auditable entities are stamped instead of removed.
        for entity in entities.iter_mut() {
            let id = entity.id();
            let Some(audit) = entity.audit_mut() else {
                continue;
            };
            audit.stamp_modified(id, Utc::now());

            self.stage_update(entity).await;
            self.save().await?;
        }

        tracing::debug!(
            table = T::table_name(),
            count = entities.len(),
            "Stamped auditable entities instead of deleting"
        );
        Ok(())
    }

    async fn delete_where(&self, predicate: Option<Condition>) -> AppResult<()> {
        let predicate = predicate.ok_or_else(|| AppError::invalid_argument("predicate"))?;

        let models = T::Entity::find()
            .filter(predicate)
            .all(self.ctx.connection())
            .await
            .map_err(AppError::from)?;

        for model in models {
            let entity = T::from_model(model);
            self.stage_delete(entity.id()).await;
        }

        Ok(())
    }

    async fn update(&self, entity: &T) -> AppResult<()> {
        self.stage_update(entity).await;
        Ok(())
    }

    async fn save(&self) -> AppResult<u64> {
        self.ctx.save_changes().await
    }
}
