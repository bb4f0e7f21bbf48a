use serde::{Deserialize, Serialize};
use specification::{Entity, EntityId};
use strum::{Display, EnumString};
use validator::Validate;

/// Product entity - a catalog item owned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier (0 until committed)
    #[serde(default)]
    pub id: EntityId,
    /// Product name
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Product description
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    /// Price in cents (for precision)
    #[validate(range(min = 0))]
    pub price: i64,
    /// Picture URL or path
    #[serde(default)]
    pub picture_url: String,
    /// Brand label, used both as a filter value and as a facet
    #[validate(length(min = 1, max = 50))]
    pub brand: String,
    /// Type label, used both as a filter value and as a facet
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub product_type: String,
}

impl Product {
    /// Display price (computed from price)
    pub fn display_price(&self) -> f64 {
        self.price as f64 / 100.0
    }
}

impl Entity for Product {
    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }
}

/// Sort token accepted by the catalog
///
/// Unknown or missing tokens fall back to [`ProductSort::Name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum ProductSort {
    /// Ascending by name
    #[default]
    #[strum(serialize = "name")]
    Name,
    /// Ascending by price
    #[strum(serialize = "priceAsc")]
    PriceAsc,
    /// Descending by price
    #[strum(serialize = "priceDesc")]
    PriceDesc,
}

impl ProductSort {
    pub fn from_token(token: Option<&str>) -> Self {
        token.and_then(|t| t.parse().ok()).unwrap_or_default()
    }
}

/// Query parameters for listing products
///
/// All fields are untrusted caller input; paging values are bounded by
/// [`CatalogConfig`](crate::config::CatalogConfig) before any evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpecParams {
    /// Exact, case-sensitive brand match
    pub brand: Option<String>,
    /// Exact, case-sensitive type match
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    /// `priceAsc`, `priceDesc`, anything else sorts by name
    pub sort: Option<String>,
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
    /// 1-based page index
    pub page_index: Option<i64>,
    /// Page size
    pub page_size: Option<i64>,
}

impl ProductSpecParams {
    pub fn sort(&self) -> ProductSort {
        ProductSort::from_token(self.sort.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_tokens() {
        assert_eq!(ProductSort::from_token(Some("priceAsc")), ProductSort::PriceAsc);
        assert_eq!(ProductSort::from_token(Some("priceDesc")), ProductSort::PriceDesc);
        assert_eq!(ProductSort::from_token(Some("pricedesc")), ProductSort::Name);
        assert_eq!(ProductSort::from_token(Some("rating")), ProductSort::Name);
        assert_eq!(ProductSort::from_token(None), ProductSort::Name);
    }

    #[test]
    fn test_params_deserialize_from_query_keys() {
        let params: ProductSpecParams = serde_json::from_value(serde_json::json!({
            "brand": "Acme",
            "type": "Boards",
            "sort": "priceDesc",
            "search": "blue",
            "pageIndex": 2,
            "pageSize": 8
        }))
        .unwrap();

        assert_eq!(params.brand.as_deref(), Some("Acme"));
        assert_eq!(params.product_type.as_deref(), Some("Boards"));
        assert_eq!(params.sort(), ProductSort::PriceDesc);
        assert_eq!(params.search.as_deref(), Some("blue"));
        assert_eq!(params.page_index, Some(2));
        assert_eq!(params.page_size, Some(8));
    }

    #[test]
    fn test_product_type_serializes_as_type() {
        let product = Product {
            id: 3,
            name: "Board".to_string(),
            description: String::new(),
            price: 15000,
            picture_url: String::new(),
            brand: "Acme".to_string(),
            product_type: "Boards".to_string(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["type"], "Boards");
        assert_eq!(json["pictureUrl"], "");
        assert_eq!(product.display_price(), 150.0);
    }

    #[test]
    fn test_entity_check_rejects_invalid_product() {
        let product = Product {
            id: 0,
            name: String::new(),
            description: String::new(),
            price: -1,
            picture_url: String::new(),
            brand: "Acme".to_string(),
            product_type: "Boards".to_string(),
        };
        assert!(product.check().is_err());
    }
}
