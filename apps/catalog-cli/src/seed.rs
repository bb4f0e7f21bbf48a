//! Bundled catalog data

use domain_products::Product;
use eyre::{Result, WrapErr};
use specification::InMemoryStore;
use tracing::info;
use validator::Validate;

const PRODUCTS_JSON: &str = include_str!("../data/products.json");

/// Parse the bundled products, rejecting any that fail validation.
pub fn products() -> Result<Vec<Product>> {
    let products: Vec<Product> =
        serde_json::from_str(PRODUCTS_JSON).wrap_err("Failed to parse bundled products")?;

    for product in &products {
        product
            .validate()
            .wrap_err_with(|| format!("Invalid bundled product '{}'", product.name))?;
    }
    Ok(products)
}

/// Build a store holding the bundled catalog.
pub fn store() -> Result<InMemoryStore<Product>> {
    let products = products()?;
    info!(count = products.len(), "Seeding catalog");
    Ok(InMemoryStore::seeded(products))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_products_parse() {
        let products = products().unwrap();
        assert!(!products.is_empty());
        assert!(products.iter().all(|p| p.id == 0));
        assert!(products.iter().all(|p| p.price >= 0));
    }

    #[tokio::test]
    async fn test_store_assigns_sequential_ids() {
        let store = store().unwrap();
        let count = products().unwrap().len();
        assert_eq!(store.len().await, count);
    }
}
