//! Product specifications built from catalog query parameters.

use specification::{OrderBy, Paging, ProjectionSpecification, Specification};

use crate::models::{Product, ProductSort, ProductSpecParams};

/// Specification for a product listing.
///
/// - `brand` / `type`: exact, case-sensitive match, skipped when empty
/// - `search`: case-insensitive substring of the name, skipped when empty
/// - `sort`: `priceAsc`, `priceDesc`, otherwise ascending by name
/// - paging only when both `pageIndex` and `pageSize` are present and positive
pub fn product_spec(params: &ProductSpecParams) -> Specification<Product> {
    let mut spec = product_spec_for(
        params.brand.as_deref(),
        params.product_type.as_deref(),
        params.sort.as_deref(),
    );

    if let Some(search) = non_empty(params.search.as_deref()) {
        let needle = search.to_lowercase();
        spec = spec.filter(move |p: &Product| p.name.to_lowercase().contains(&needle));
    }

    let window = params
        .page_index
        .zip(params.page_size)
        .filter(|(index, size)| *index > 0 && *size > 0)
        .and_then(|(index, size)| {
            Some((usize::try_from(index).ok()?, usize::try_from(size).ok()?))
        });
    if let Some((index, size)) = window {
        spec = spec.page(Paging::for_page(index, size));
    }

    spec
}

/// Specification from explicit brand, type and sort token. Unpaged.
pub fn product_spec_for(
    brand: Option<&str>,
    product_type: Option<&str>,
    sort: Option<&str>,
) -> Specification<Product> {
    let mut spec = Specification::new();

    if let Some(brand) = non_empty(brand) {
        let brand = brand.to_string();
        spec = spec.filter(move |p: &Product| p.brand == brand);
    }
    if let Some(product_type) = non_empty(product_type) {
        let product_type = product_type.to_string();
        spec = spec.filter(move |p: &Product| p.product_type == product_type);
    }

    spec.order_by(ordering(ProductSort::from_token(sort)))
}

/// Distinct, sorted brand labels across all products.
pub fn brand_list_spec() -> ProjectionSpecification<Product, String> {
    ProjectionSpecification::new(|p: &Product| p.brand.clone())
        .distinct()
        .sorted()
}

/// Distinct, sorted type labels across all products.
pub fn type_list_spec() -> ProjectionSpecification<Product, String> {
    ProjectionSpecification::new(|p: &Product| p.product_type.clone())
        .distinct()
        .sorted()
}

fn ordering(sort: ProductSort) -> OrderBy<Product> {
    match sort {
        ProductSort::PriceAsc => OrderBy::asc("price", |p: &Product| p.price),
        ProductSort::PriceDesc => OrderBy::desc("price", |p: &Product| p.price),
        ProductSort::Name => OrderBy::asc("name", |p: &Product| p.name.clone()),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
