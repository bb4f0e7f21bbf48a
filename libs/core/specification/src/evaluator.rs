//! Applies specifications to in-memory sequences.
//!
//! Steps always run in the same order: filter, order, page, then (for
//! projections) select and distinct. Paging therefore always sees filtered,
//! sorted input. Nothing here mutates the source.

use std::collections::BTreeSet;

use crate::spec::{OrderBy, Paging, ProjectionSpecification, Specification};

/// Entities satisfying the criteria, in source order.
pub fn filter<'a, T, I>(source: I, spec: &Specification<T>) -> Vec<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    source
        .into_iter()
        .filter(|entity| spec.is_satisfied_by(entity))
        .collect()
}

/// Number of entities satisfying the criteria. Paging is ignored.
pub fn count<'a, T, I>(source: I, spec: &Specification<T>) -> usize
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    source
        .into_iter()
        .filter(|entity| spec.is_satisfied_by(entity))
        .count()
}

/// Filter, order and page `source` according to `spec`.
pub fn evaluate<'a, T, I>(source: I, spec: &Specification<T>) -> Vec<T>
where
    T: Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let matched = filter(source, spec);
    order_and_page(matched, spec.ordering(), spec.paging())
}

/// Total match count and one page of results, from a single filtering pass.
///
/// `paging` replaces whatever window `spec` carries, so the count and the
/// items are always derived from the same criteria.
pub fn evaluate_paged<'a, T, I>(
    source: I,
    spec: &Specification<T>,
    paging: Paging,
) -> (usize, Vec<T>)
where
    T: Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let matched = filter(source, spec);
    let total = matched.len();
    let items = order_and_page(matched, spec.ordering(), Some(paging));
    tracing::debug!(
        total,
        returned = items.len(),
        ?paging,
        "evaluated paged specification"
    );
    (total, items)
}

/// Evaluate the base specification, then select, de-duplicate and sort values.
pub fn evaluate_projection<'a, T, R, I>(
    source: I,
    spec: &ProjectionSpecification<T, R>,
) -> Vec<R>
where
    T: 'a,
    R: Ord + Clone,
    I: IntoIterator<Item = &'a T>,
{
    let base = spec.base();
    let mut matched = filter(source, base);
    if let Some(order_by) = base.ordering() {
        matched.sort_by(|a, b| order_by.compare(a, b));
    }

    let window = window(matched.len(), base.paging());
    let selected = matched[window].iter().map(|entity| spec.select(entity));

    let mut values: Vec<R> = if spec.is_distinct() {
        let mut seen = BTreeSet::new();
        selected.filter(|value| seen.insert(value.clone())).collect()
    } else {
        selected.collect()
    };

    if spec.sorts_values() {
        values.sort();
    }
    values
}

fn order_and_page<T: Clone>(
    mut matched: Vec<&T>,
    order_by: Option<&OrderBy<T>>,
    paging: Option<Paging>,
) -> Vec<T> {
    if let Some(order_by) = order_by {
        // `sort_by` is stable, equal keys keep source order.
        matched.sort_by(|a, b| order_by.compare(a, b));
    }
    let window = window(matched.len(), paging);
    matched[window].iter().map(|entity| (*entity).clone()).collect()
}

fn window(len: usize, paging: Option<Paging>) -> std::ops::Range<usize> {
    match paging {
        Some(Paging { skip, take }) => {
            let start = skip.min(len);
            start..start.saturating_add(take).min(len)
        }
        None => 0..len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        key: &'static str,
        rank: u32,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { key: "d", rank: 2 },
            Row { key: "a", rank: 1 },
            Row { key: "c", rank: 2 },
            Row { key: "b", rank: 3 },
            Row { key: "e", rank: 1 },
        ]
    }

    fn keys(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.key).collect()
    }

    #[test]
    fn test_no_criteria_returns_source_order() {
        let source = rows();
        let result = evaluate(&source, &Specification::new());
        assert_eq!(result, source);
    }

    #[test]
    fn test_filter_then_order_then_page() {
        let source = rows();
        let spec = Specification::new()
            .filter(|r: &Row| r.key != "b")
            .order_by(OrderBy::asc("key", |r: &Row| r.key))
            .page(Paging::new(1, 2));

        assert_eq!(keys(&evaluate(&source, &spec)), vec!["c", "d"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let source = rows();

        let asc = Specification::new().order_by(OrderBy::asc("rank", |r: &Row| r.rank));
        assert_eq!(keys(&evaluate(&source, &asc)), vec!["a", "e", "d", "c", "b"]);

        let desc = Specification::new().order_by(OrderBy::desc("rank", |r: &Row| r.rank));
        assert_eq!(keys(&evaluate(&source, &desc)), vec!["b", "d", "c", "a", "e"]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let source = rows();
        let spec = Specification::new().page(Paging::new(10, 3));
        assert!(evaluate(&source, &spec).is_empty());
    }

    #[test]
    fn test_evaluate_paged_counts_before_paging() {
        let source = rows();
        let spec = Specification::new()
            .filter(|r: &Row| r.rank < 3)
            .page(Paging::new(0, 1));

        let (total, items) = evaluate_paged(&source, &spec, Paging::for_page(2, 3));
        assert_eq!(total, 4);
        assert_eq!(keys(&items), vec!["e"]);
        assert_eq!(count(&source, &spec), 4);
    }

    #[test]
    fn test_projection_distinct_sorted() {
        let source = rows();
        let spec = ProjectionSpecification::new(|r: &Row| r.rank)
            .distinct()
            .sorted();
        assert_eq!(evaluate_projection(&source, &spec), vec![1, 2, 3]);
    }

    #[test]
    fn test_projection_distinct_keeps_first_occurrence() {
        let source = rows();
        let spec = ProjectionSpecification::new(|r: &Row| r.rank).distinct();
        assert_eq!(evaluate_projection(&source, &spec), vec![2, 1, 3]);
    }

    #[test]
    fn test_source_is_not_mutated() {
        let source = rows();
        let spec = Specification::new().order_by(OrderBy::desc("key", |r: &Row| r.key));
        let _ = evaluate(&source, &spec);
        assert_eq!(source, rows());
    }
}
