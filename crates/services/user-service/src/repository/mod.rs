//! Repository layer for data access.

pub mod entities;
mod entity_repository;
mod paged_list;
mod persistable;

pub use entity_repository::{
    ColumnOf, EntityOf, EntityRepository, OrderBy, QueryTransform, Repository,
};
pub use paged_list::{PageRequest, PagedList, UNBOUNDED_PAGE_SIZE};
pub use persistable::Persistable;
