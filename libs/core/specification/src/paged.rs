use serde::{Deserialize, Serialize};

/// One page of results plus paging metadata.
///
/// `total_count` is the number of entities matching the criteria before the
/// paging window was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub page_index: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub items: Vec<T>,
}

impl<T> PagedResult<T> {
    pub fn new(page_index: usize, page_size: usize, total_count: usize, items: Vec<T>) -> Self {
        debug_assert!(
            items.len() <= page_size,
            "page holds {} items but page size is {}",
            items.len(),
            page_size
        );
        Self {
            page_index,
            page_size,
            total_count,
            items,
        }
    }

    /// Number of pages needed to hold `total_count` entities.
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index < self.total_pages()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let page = PagedResult::new(1, 6, 13, vec![0; 6]);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next_page());

        let last = PagedResult::new(3, 6, 13, vec![0; 1]);
        assert!(!last.has_next_page());
    }

    #[test]
    fn test_zero_page_size_has_no_pages() {
        let page: PagedResult<u8> = PagedResult::new(1, 0, 5, vec![]);
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let page = PagedResult::new(2, 6, 6, Vec::<u8>::new());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageIndex"], 2);
        assert_eq!(json["pageSize"], 6);
        assert_eq!(json["totalCount"], 6);
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
