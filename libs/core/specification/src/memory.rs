//! In-memory store with unit-of-work repositories.
//!
//! Reads share a read lock and evaluate against a consistent snapshot. A
//! commit holds the write lock for its whole duration and applies staged
//! changes to a copy of the table, swapping it in only if every change
//! succeeds.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};

use crate::entity::{Entity, EntityId};
use crate::error::{RepositoryError, RepositoryResult};
use crate::evaluator;
use crate::paged::PagedResult;
use crate::repository::{Repository, RepositoryProvider};
use crate::spec::{Paging, ProjectionSpecification, Specification};

#[derive(Debug, Clone)]
struct Table<T> {
    rows: BTreeMap<EntityId, T>,
    next_id: EntityId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug, Error)]
enum CommitRejection {
    #[error("entity {id} violates a constraint: {reason}")]
    Constraint { id: EntityId, reason: String },

    #[error("entity {0} does not exist")]
    Missing(EntityId),

    #[error("identity space exhausted")]
    IdentityExhausted,
}

#[derive(Debug, Clone)]
enum Change<T> {
    Add(T),
    Update(T),
    Delete(EntityId),
}

impl<T: Entity> Table<T> {
    /// Apply changes to a copy. Returns the new table and the assigned ids.
    fn apply(&self, changes: Vec<Change<T>>) -> Result<(Self, Vec<EntityId>), CommitRejection> {
        let mut next = self.clone();
        let mut inserted = Vec::new();

        for change in changes {
            match change {
                Change::Add(mut entity) => {
                    let id = next.next_id;
                    entity
                        .check()
                        .map_err(|reason| CommitRejection::Constraint { id, reason })?;
                    next.next_id = id
                        .checked_add(1)
                        .ok_or(CommitRejection::IdentityExhausted)?;
                    entity.set_id(id);
                    next.rows.insert(id, entity);
                    inserted.push(id);
                }
                Change::Update(entity) => {
                    let id = entity.id();
                    entity
                        .check()
                        .map_err(|reason| CommitRejection::Constraint { id, reason })?;
                    let slot = next.rows.get_mut(&id).ok_or(CommitRejection::Missing(id))?;
                    *slot = entity;
                }
                Change::Delete(id) => {
                    next.rows.remove(&id).ok_or(CommitRejection::Missing(id))?;
                }
            }
        }

        Ok((next, inserted))
    }
}

/// Shared in-memory entity store. Cloning shares the underlying data.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    table: Arc<RwLock<Table<T>>>,
    online: Arc<AtomicBool>,
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            online: Arc::clone(&self.online),
        }
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// A store pre-populated with `entities`, given identities 1, 2, 3, ...
    /// in iteration order. Incoming identities are ignored.
    pub fn seeded(entities: impl IntoIterator<Item = T>) -> Self {
        let mut table = Table::default();
        for mut entity in entities {
            let id = table.next_id;
            entity.set_id(id);
            table.rows.insert(id, entity);
            table.next_id += 1;
        }
        debug!(rows = table.rows.len(), "seeded in-memory store");

        Self {
            table: Arc::new(RwLock::new(table)),
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Number of committed entities.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Simulate the store going away or coming back. While offline, reads
    /// fail with [`RepositoryError::Unavailable`] and commits return `false`.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    async fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, Table<T>>> {
        if !self.is_online() {
            return Err(RepositoryError::Unavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(self.table.read().await)
    }
}

impl<T: Entity> RepositoryProvider<T> for InMemoryStore<T> {
    type Repository = InMemoryRepository<T>;

    fn repository(&self) -> Self::Repository {
        InMemoryRepository::new(self.clone())
    }
}

/// Unit-of-work repository over an [`InMemoryStore`].
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    store: InMemoryStore<T>,
    pending: Mutex<Vec<Change<T>>>,
    inserted: Mutex<Vec<EntityId>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new(store: InMemoryStore<T>) -> Self {
        Self {
            store,
            pending: Mutex::new(Vec::new()),
            inserted: Mutex::new(Vec::new()),
        }
    }

    /// Number of changes staged and not yet committed.
    pub fn pending_changes(&self) -> usize {
        self.pending().len()
    }

    fn pending(&self) -> MutexGuard<'_, Vec<Change<T>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn inserted(&self) -> MutexGuard<'_, Vec<EntityId>> {
        self.inserted.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get_by_id(&self, id: EntityId) -> RepositoryResult<Option<T>> {
        let table = self.store.read().await?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list_all(&self, spec: &Specification<T>) -> RepositoryResult<Vec<T>> {
        let table = self.store.read().await?;
        Ok(evaluator::evaluate(table.rows.values(), spec))
    }

    async fn list_projected<R>(
        &self,
        spec: &ProjectionSpecification<T, R>,
    ) -> RepositoryResult<Vec<R>>
    where
        R: Ord + Clone + Send + 'static,
    {
        let table = self.store.read().await?;
        Ok(evaluator::evaluate_projection(table.rows.values(), spec))
    }

    async fn count(&self, spec: &Specification<T>) -> RepositoryResult<usize> {
        let table = self.store.read().await?;
        Ok(evaluator::count(table.rows.values(), spec))
    }

    async fn list_paged(
        &self,
        spec: &Specification<T>,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedResult<T>> {
        let table = self.store.read().await?;
        let paging = Paging::for_page(page_index, page_size);
        let (total, items) = evaluator::evaluate_paged(table.rows.values(), spec, paging);
        Ok(PagedResult::new(page_index, page_size, total, items))
    }

    fn add(&self, entity: T) {
        self.pending().push(Change::Add(entity));
    }

    fn update(&self, entity: T) {
        self.pending().push(Change::Update(entity));
    }

    fn delete(&self, entity: T) {
        self.pending().push(Change::Delete(entity.id()));
    }

    async fn exists(&self, id: EntityId) -> RepositoryResult<bool> {
        let table = self.store.read().await?;
        Ok(table.rows.contains_key(&id))
    }

    async fn save_changes(&self) -> RepositoryResult<bool> {
        let changes = std::mem::take(&mut *self.pending());
        if changes.is_empty() {
            return Ok(false);
        }
        if !self.store.is_online() {
            warn!(
                discarded = changes.len(),
                "store offline, staged changes discarded"
            );
            return Ok(false);
        }

        let staged = changes.len();
        let mut table = self.store.table.write().await;
        match table.apply(changes) {
            Ok((next, inserted)) => {
                *table = next;
                info!(changes = staged, inserted = inserted.len(), "committed changes");
                *self.inserted() = inserted;
                Ok(true)
            }
            Err(rejection) => {
                warn!(%rejection, discarded = staged, "commit rejected, store unchanged");
                Ok(false)
            }
        }
    }

    fn inserted_ids(&self) -> Vec<EntityId> {
        self.inserted().clone()
    }
}
