//! Product Service - the caller layer over the generic repository
//!
//! Every operation opens its own repository from the provider, so staged
//! changes never leak between operations.

use specification::{EntityId, PagedResult, Repository, RepositoryProvider};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::config::CatalogConfig;
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductSpecParams};
use crate::specifications::{brand_list_spec, product_spec, type_list_spec};

/// Product service providing catalog queries and validated mutations
pub struct ProductService<P: RepositoryProvider<Product>> {
    provider: Arc<P>,
    config: CatalogConfig,
}

impl<P: RepositoryProvider<Product>> ProductService<P> {
    /// Create a new ProductService over the given repository provider
    pub fn new(provider: P, config: CatalogConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// One page of products matching the filter, with the unpaged total
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        params: ProductSpecParams,
    ) -> ProductResult<PagedResult<Product>> {
        let page = self
            .config
            .resolve_page(params.page_index, params.page_size)?;
        let spec = product_spec(&ProductSpecParams {
            page_index: None,
            page_size: None,
            ..params
        });

        let result = self
            .provider
            .repository()
            .list_paged(&spec, page.index, page.size)
            .await?;
        info!(
            page_index = page.index,
            page_size = page.size,
            total = result.total_count,
            "Listed products"
        );
        Ok(result)
    }

    /// All products matching the filter, paged only when both page values are given
    #[instrument(skip(self))]
    pub async fn list_all_products(
        &self,
        params: ProductSpecParams,
    ) -> ProductResult<Vec<Product>> {
        let params = match (params.page_index, params.page_size) {
            (Some(_), Some(_)) => {
                let page = self
                    .config
                    .resolve_page(params.page_index, params.page_size)?;
                ProductSpecParams {
                    page_index: i64::try_from(page.index).ok(),
                    page_size: i64::try_from(page.size).ok(),
                    ..params
                }
            }
            _ => params,
        };

        let products = self
            .provider
            .repository()
            .list_all(&product_spec(&params))
            .await?;
        Ok(products)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: EntityId) -> ProductResult<Product> {
        self.provider
            .repository()
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product. Any client-supplied id is ignored.
    #[instrument(skip(self, payload), fields(product_name = %payload.name))]
    pub async fn create_product(&self, mut payload: Product) -> ProductResult<Product> {
        payload.validate()?;
        payload.id = 0;

        let repository = self.provider.repository();
        repository.add(payload.clone());
        if !repository.save_changes().await? {
            warn!("Product creation was not persisted");
            return Err(ProductError::PersistenceFailure("creating"));
        }

        let id = repository
            .inserted_ids()
            .first()
            .copied()
            .ok_or(ProductError::PersistenceFailure("creating"))?;
        payload.id = id;

        info!(product_id = id, "Created product");
        Ok(payload)
    }

    /// Replace an existing product.
    ///
    /// The path id must match the payload id and the product must exist;
    /// otherwise nothing is staged.
    #[instrument(skip(self, payload))]
    pub async fn update_product(&self, id: EntityId, payload: Product) -> ProductResult<Product> {
        if payload.id != id {
            return Err(ProductError::IdMismatch {
                path: id,
                body: payload.id,
            });
        }
        payload.validate()?;

        let repository = self.provider.repository();
        if !repository.exists(id).await? {
            return Err(ProductError::UpdateTargetMissing(id));
        }

        repository.update(payload.clone());
        if !repository.save_changes().await? {
            warn!(product_id = id, "Product update was not persisted");
            return Err(ProductError::PersistenceFailure("updating"));
        }

        info!(product_id = id, "Updated product");
        Ok(payload)
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: EntityId) -> ProductResult<()> {
        let repository = self.provider.repository();
        let product = repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        repository.delete(product);
        if !repository.save_changes().await? {
            warn!(product_id = id, "Product deletion was not persisted");
            return Err(ProductError::PersistenceFailure("deleting"));
        }

        info!(product_id = id, "Deleted product");
        Ok(())
    }

    /// Distinct, sorted brand labels
    #[instrument(skip(self))]
    pub async fn brands(&self) -> ProductResult<Vec<String>> {
        Ok(self
            .provider
            .repository()
            .list_projected(&brand_list_spec())
            .await?)
    }

    /// Distinct, sorted type labels
    #[instrument(skip(self))]
    pub async fn types(&self) -> ProductResult<Vec<String>> {
        Ok(self
            .provider
            .repository()
            .list_projected(&type_list_spec())
            .await?)
    }
}

impl<P: RepositoryProvider<Product>> Clone for ProductService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            config: self.config.clone(),
        }
    }
}
