//! Canonical request handed to the remote navigation service.

use tracing::debug;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestKind {
    /// Category page browsing.
    #[default]
    Navigation,
    /// Free text search results page.
    Search,
}

/// Built empty per storefront request and filled by a filter applier.
///
/// A search request never carries a category path and a navigation request
/// never carries a search term; the setters refuse the mismatching value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationRequest {
    kind: RequestKind,
    attribute_filters: Vec<(String, String)>,
    category_path: Option<Vec<u64>>,
    sort_order: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
}

impl NavigationRequest {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn navigation() -> Self {
        Self::new(RequestKind::Navigation)
    }

    pub fn search() -> Self {
        Self::new(RequestKind::Search)
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn is_search(&self) -> bool {
        self.kind == RequestKind::Search
    }

    /// Duplicate pairs are kept, they select the same value twice.
    pub fn add_attribute_filter(&mut self, attribute: &str, value: &str) {
        self.attribute_filters.push((attribute.to_string(), value.to_string()));
    }

    pub fn attribute_filters(&self) -> &[(String, String)] {
        &self.attribute_filters
    }

    /// Category ids ordered from root to leaf.
    pub fn set_category_path(&mut self, path: Vec<u64>) {
        if self.is_search() {
            debug!("ignoring category path {:?} on search request", path);
            return;
        }
        if path.is_empty() {
            return;
        }
        self.category_path = Some(path);
    }

    pub fn category_path(&self) -> Option<&[u64]> {
        self.category_path.as_deref()
    }

    pub fn set_sort_order(&mut self, order: &str) {
        self.sort_order = Some(order.to_string());
    }

    pub fn sort_order(&self) -> Option<&str> {
        self.sort_order.as_deref()
    }

    pub fn set_page(&mut self, page: u32) {
        if page > 0 {
            self.page = Some(page);
        }
    }

    pub fn page(&self) -> Option<u32> {
        self.page
    }

    pub fn set_limit(&mut self, limit: u32) {
        if limit > 0 {
            self.limit = Some(limit);
        }
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn set_search(&mut self, search: &str) {
        if !self.is_search() {
            debug!("ignoring search term {:?} on navigation request", search);
            return;
        }
        self.search = Some(search.to_string());
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }
}
