//! Products Domain
//!
//! Catalog queries over the generic [`specification`] repository: brand/type
//! filters, free-text search, price or name ordering, bounded paging and the
//! brand/type facet lists.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │     Service      │  ← caller layer: paging bounds, id rules, validation
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │  Specifications  │  ← ProductSpecParams → Specification<Product>
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ Repository<T>    │  ← generic, from the specification crate
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │     Models       │  ← Product entity, query params, sort tokens
//! └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{CatalogConfig, Product, ProductService, ProductSpecParams};
//! use specification::InMemoryStore;
//!
//! # async fn example(seed: Vec<Product>) -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::seeded(seed);
//! let service = ProductService::new(store, CatalogConfig::default());
//!
//! let page = service
//!     .list_products(ProductSpecParams {
//!         brand: Some("Angular".to_string()),
//!         sort: Some("priceDesc".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{} of {}", page.items.len(), page.total_count);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod specifications;

// Re-export commonly used types
pub use config::{CatalogConfig, PageRequest, PageSizePolicy};
pub use error::{ProductError, ProductResult};
pub use models::{Product, ProductSort, ProductSpecParams};
pub use service::ProductService;
