use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Page size used when a caller asks for size 0.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Zero-based page cursor sent as `page` / `size` query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "page")]
    pub index: u32,
    pub size: u32,
}

impl PageQuery {
    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// Same cursor with [`DEFAULT_PAGE_SIZE`] filled in when size is 0.
    pub fn with_default_size(self) -> Self {
        if self.size == 0 {
            Self {
                size: DEFAULT_PAGE_SIZE,
                ..self
            }
        } else {
            self
        }
    }
}

/// Cursor state echoed with every collection response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl PageInfo {
    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.number.saturating_add(1) >= self.total_pages
    }
}

/// Collection envelope: `{"_embedded": {"<typeKey>": [...]}, "page": {...}}`.
///
/// The key under `_embedded` differs per resource type, so it is read as a map.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paged<T> {
    #[serde(rename = "_embedded", default)]
    embedded: BTreeMap<String, Vec<T>>,
    #[serde(default)]
    page: PageInfo,
}

impl<T> Paged<T> {
    pub fn page_info(&self) -> PageInfo {
        self.page
    }

    pub fn len(&self) -> usize {
        self.embedded.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_items(self) -> Vec<T> {
        self.embedded.into_values().flatten().collect()
    }

    pub fn into_page(self) -> Page<T> {
        let info = self.page;
        Page {
            items: self.into_items(),
            info,
        }
    }
}

/// One page of items with its cursor, as handed to the pagination walker.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> From<Paged<T>> for Page<T> {
    fn from(paged: Paged<T>) -> Self {
        paged.into_page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_reads_variably_named_collection_key() {
        let body = r#"{
            "_embedded": {"mdsClusterDTOes": [{"id": "a"}, {"id": "b"}]},
            "page": {"number": 0, "size": 100, "totalElements": 2, "totalPages": 1}
        }"#;

        let paged: Paged<Item> = serde_json::from_str(body).unwrap();
        assert_eq!(paged.page_info().total_elements, 2);
        assert_eq!(paged.into_items().len(), 2);
    }

    #[test]
    fn test_missing_embedded_means_no_items() {
        let body = r#"{"page": {"number": 0, "size": 100, "totalElements": 0, "totalPages": 0}}"#;

        let paged: Paged<Item> = serde_json::from_str(body).unwrap();
        assert!(paged.is_empty());
        assert!(paged.page_info().is_last());
    }

    #[test]
    fn test_default_size_only_fills_zero() {
        assert_eq!(PageQuery::default().with_default_size().size, DEFAULT_PAGE_SIZE);
        assert_eq!(PageQuery::new(2, 10).with_default_size(), PageQuery::new(2, 10));
    }
}
