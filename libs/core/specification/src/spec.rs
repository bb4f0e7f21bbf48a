//! Specification value objects.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use strum::{Display, EnumString};

/// Shared predicate over an entity.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;
type Selector<T, R> = Arc<dyn Fn(&T) -> R + Send + Sync>;

/// Sort direction
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Ordering by a named field.
///
/// Sorting with an `OrderBy` is stable in both directions: entities that
/// compare equal keep their relative order from the input.
pub struct OrderBy<T> {
    field: &'static str,
    direction: SortDirection,
    compare: Comparator<T>,
}

impl<T> OrderBy<T> {
    /// Order by an arbitrary comparator, for keys that are not `Ord`.
    pub fn by<F>(field: &'static str, direction: SortDirection, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            field,
            direction,
            compare: Arc::new(compare),
        }
    }

    pub fn asc<K, F>(field: &'static str, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::by(field, SortDirection::Ascending, move |a, b| key(a).cmp(&key(b)))
    }

    pub fn desc<K, F>(field: &'static str, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::by(field, SortDirection::Descending, move |a, b| {
            key(a).cmp(&key(b))
        })
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Compare two entities, honouring the direction.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.compare)(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl<T> Clone for OrderBy<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            direction: self.direction,
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for OrderBy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBy")
            .field("field", &self.field)
            .field("direction", &self.direction)
            .finish()
    }
}

/// Skip/take window. Both values are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub skip: usize,
    pub take: usize,
}

impl Paging {
    pub fn new(skip: usize, take: usize) -> Self {
        Self { skip, take }
    }

    /// Window for a 1-based page index. Index `0` is treated as the first page.
    pub fn for_page(page_index: usize, page_size: usize) -> Self {
        Self {
            skip: page_index.max(1).saturating_sub(1).saturating_mul(page_size),
            take: page_size,
        }
    }
}

/// Which entities to select, in what order, and which window of them.
pub struct Specification<T> {
    criteria: Option<Predicate<T>>,
    order_by: Option<OrderBy<T>>,
    paging: Option<Paging>,
    includes: Vec<String>,
}

impl<T> Specification<T> {
    /// A specification matching every entity, in store order, unpaged.
    pub fn new() -> Self {
        Self {
            criteria: None,
            order_by: None,
            paging: None,
            includes: Vec::new(),
        }
    }

    /// Add a predicate. Repeated calls are combined with logical AND.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
        T: 'static,
    {
        self.criteria = Some(match self.criteria.take() {
            Some(existing) => Arc::new(move |e: &T| existing(e) && predicate(e)),
            None => Arc::new(predicate),
        });
        self
    }

    /// Replace the ordering.
    pub fn order_by(mut self, order_by: OrderBy<T>) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn page(mut self, paging: Paging) -> Self {
        self.paging = Some(paging);
        self
    }

    /// Mark a related path for eager loading. Stores without relations ignore it.
    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.includes.push(path.into());
        self
    }

    /// Same criteria, ordering and includes, with the paging window removed.
    pub fn without_paging(&self) -> Self {
        Self {
            paging: None,
            ..self.clone()
        }
    }

    pub fn criteria(&self) -> Option<&Predicate<T>> {
        self.criteria.as_ref()
    }

    pub fn ordering(&self) -> Option<&OrderBy<T>> {
        self.order_by.as_ref()
    }

    pub fn paging(&self) -> Option<Paging> {
        self.paging
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Whether `entity` satisfies the criteria. No criteria matches everything.
    pub fn is_satisfied_by(&self, entity: &T) -> bool {
        self.criteria.as_ref().is_none_or(|predicate| predicate(entity))
    }
}

impl<T> Default for Specification<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Specification<T> {
    fn clone(&self) -> Self {
        Self {
            criteria: self.criteria.clone(),
            order_by: self.order_by.clone(),
            paging: self.paging,
            includes: self.includes.clone(),
        }
    }
}

impl<T> fmt::Debug for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("has_criteria", &self.criteria.is_some())
            .field("order_by", &self.order_by)
            .field("paging", &self.paging)
            .field("includes", &self.includes)
            .finish()
    }
}

/// A specification whose results are mapped through a selector.
///
/// Used for value lists such as facets: select one attribute, optionally
/// drop duplicates and sort the selected values.
pub struct ProjectionSpecification<T, R> {
    base: Specification<T>,
    selector: Selector<T, R>,
    distinct: bool,
    sort_values: bool,
}

impl<T, R> ProjectionSpecification<T, R> {
    pub fn new<F>(selector: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        Self::from_spec(Specification::new(), selector)
    }

    pub fn from_spec<F>(base: Specification<T>, selector: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        Self {
            base,
            selector: Arc::new(selector),
            distinct: false,
            sort_values: false,
        }
    }

    /// Keep only the first occurrence of each selected value.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Sort the selected values ascending after selection.
    pub fn sorted(mut self) -> Self {
        self.sort_values = true;
        self
    }

    pub fn base(&self) -> &Specification<T> {
        &self.base
    }

    pub fn select(&self, entity: &T) -> R {
        (self.selector)(entity)
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn sorts_values(&self) -> bool {
        self.sort_values
    }
}

impl<T, R> Clone for ProjectionSpecification<T, R> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            selector: Arc::clone(&self.selector),
            distinct: self.distinct,
            sort_values: self.sort_values,
        }
    }
}

impl<T, R> fmt::Debug for ProjectionSpecification<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionSpecification")
            .field("base", &self.base)
            .field("distinct", &self.distinct)
            .field("sort_values", &self.sort_values)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_specification_matches_everything() {
        let spec = Specification::<i32>::new();
        assert!(spec.criteria().is_none());
        assert!(spec.ordering().is_none());
        assert!(spec.paging().is_none());
        assert!(spec.is_satisfied_by(&42));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let spec = Specification::<i32>::new()
            .filter(|n| *n > 2)
            .filter(|n| n % 2 == 0);

        assert!(spec.is_satisfied_by(&4));
        assert!(!spec.is_satisfied_by(&3));
        assert!(!spec.is_satisfied_by(&2));
    }

    #[test]
    fn test_descending_reverses_comparison() {
        let order = OrderBy::<i32>::desc("value", |n| *n);
        assert_eq!(order.compare(&1, &2), Ordering::Greater);
        assert_eq!(order.compare(&2, &2), Ordering::Equal);
        assert_eq!(order.field(), "value");
        assert_eq!(order.direction(), SortDirection::Descending);
    }

    #[test]
    fn test_paging_for_page() {
        assert_eq!(Paging::for_page(1, 6), Paging::new(0, 6));
        assert_eq!(Paging::for_page(3, 8), Paging::new(16, 8));
        assert_eq!(Paging::for_page(0, 5), Paging::new(0, 5));
    }

    #[test]
    fn test_without_paging_keeps_criteria() {
        let spec = Specification::<i32>::new()
            .filter(|n| *n > 0)
            .include("children")
            .page(Paging::new(2, 2));
        let unpaged = spec.without_paging();

        assert!(unpaged.paging().is_none());
        assert!(unpaged.criteria().is_some());
        assert_eq!(unpaged.includes(), ["children".to_string()]);
    }

    #[test]
    fn test_sort_direction_parses() {
        assert_eq!(
            "descending".parse::<SortDirection>().unwrap(),
            SortDirection::Descending
        );
        assert_eq!(SortDirection::default(), SortDirection::Ascending);
    }
}
