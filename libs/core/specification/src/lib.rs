//! Specification pattern for entity queries.
//!
//! A [`Specification`] describes *which* entities to select, *how* to order
//! them and *which page* to return, without knowing anything about the store.
//! The [`evaluator`] turns a specification into results over any sequence of
//! entities, and a [`Repository`] exposes it together with staged mutations
//! that are committed atomically by `save_changes`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Specification   │  ← criteria, ordering, paging, includes
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │    Repository    │  ← get/list/paged/exists + staged add/update/delete
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │    Evaluator     │  ← filter → order → page (→ select → distinct)
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │      Store       │  ← InMemoryStore (snapshot reads, exclusive commits)
//! └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use specification::{
//!     Entity, EntityId, InMemoryStore, OrderBy, Repository, RepositoryProvider, Specification,
//! };
//!
//! #[derive(Debug, Clone)]
//! struct Book {
//!     id: EntityId,
//!     title: String,
//! }
//!
//! impl Entity for Book {
//!     fn id(&self) -> EntityId {
//!         self.id
//!     }
//!     fn set_id(&mut self, id: EntityId) {
//!         self.id = id;
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store: InMemoryStore<Book> = InMemoryStore::new();
//! let repo = store.repository();
//! repo.add(Book { id: 0, title: "Dune".into() });
//! repo.add(Book { id: 0, title: "Emma".into() });
//! assert!(repo.save_changes().await?);
//!
//! let spec = Specification::new()
//!     .filter(|b: &Book| b.title.starts_with('D'))
//!     .order_by(OrderBy::asc("title", |b: &Book| b.title.clone()));
//! let books = store.repository().list_all(&spec).await?;
//! assert_eq!(books.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod evaluator;
pub mod memory;
pub mod paged;
pub mod repository;
pub mod spec;

pub use entity::{Entity, EntityId};
pub use error::{RepositoryError, RepositoryResult};
pub use memory::{InMemoryRepository, InMemoryStore};
pub use paged::PagedResult;
pub use repository::{Repository, RepositoryProvider};
pub use spec::{OrderBy, Paging, ProjectionSpecification, SortDirection, Specification};
