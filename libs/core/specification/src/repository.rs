use async_trait::async_trait;

use crate::entity::{Entity, EntityId};
use crate::error::RepositoryResult;
use crate::paged::PagedResult;
use crate::spec::{ProjectionSpecification, Specification};

/// Generic repository over one entity type.
///
/// Reads go straight to the store. `add`, `update` and `delete` only stage a
/// change on this repository instance; nothing reaches the store until
/// [`save_changes`](Repository::save_changes) commits every staged change at
/// once. Staged changes are dropped after each commit attempt, successful or
/// not, and dropping the repository discards them too.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Get an entity by identity. Absence is `Ok(None)`.
    async fn get_by_id(&self, id: EntityId) -> RepositoryResult<Option<T>>;

    /// All entities matching the specification, ordered and paged as it says.
    async fn list_all(&self, spec: &Specification<T>) -> RepositoryResult<Vec<T>>;

    /// Projected values, e.g. a distinct sorted list of one attribute.
    async fn list_projected<R>(
        &self,
        spec: &ProjectionSpecification<T, R>,
    ) -> RepositoryResult<Vec<R>>
    where
        R: Ord + Clone + Send + 'static;

    /// Number of entities matching the criteria, ignoring any paging.
    async fn count(&self, spec: &Specification<T>) -> RepositoryResult<usize>;

    /// One page of matching entities plus the unpaged match count.
    ///
    /// The count and the page come from the same snapshot and criteria. The
    /// window given here replaces any paging carried by `spec`.
    async fn list_paged(
        &self,
        spec: &Specification<T>,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedResult<T>>;

    /// Stage a new entity. Its identity is assigned on commit.
    fn add(&self, entity: T);

    /// Stage a replacement of the entity with the same identity.
    fn update(&self, entity: T);

    /// Stage removal of the entity with the same identity.
    fn delete(&self, entity: T);

    /// Whether an entity with this identity is committed.
    async fn exists(&self, id: EntityId) -> RepositoryResult<bool>;

    /// Commit all staged changes atomically.
    ///
    /// Returns `Ok(true)` when at least one change was persisted and
    /// `Ok(false)` when nothing was staged or the commit was rejected, in
    /// which case the store is left exactly as it was.
    async fn save_changes(&self) -> RepositoryResult<bool>;

    /// Identities assigned to added entities by the last successful commit,
    /// in the order they were staged.
    fn inserted_ids(&self) -> Vec<EntityId>;
}

/// Hands out a fresh repository (and so a fresh set of staged changes) per
/// unit of work, all backed by the same shared store.
pub trait RepositoryProvider<T: Entity>: Send + Sync {
    type Repository: Repository<T>;

    fn repository(&self) -> Self::Repository;
}
