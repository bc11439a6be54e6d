//! Resolution of category facet items to store categories.

use std::sync::Arc;

use common::{category::Category, search_result::FilterItem};
use tracing::debug;

use crate::config::Config;

mod repository;
pub use repository::{CategoryRepository, InMemoryCategoryRepository};


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("category {0} not found")]
    NotFound(u64),
    #[error("invalid category reference {0:?}")]
    InvalidReference(String),
}

/// Exported ids are `1` + four digit store id + entity id.
const SERVICE_ID_PREFIX_LEN: usize = 5;

pub fn service_id(store_id: u32, entity_id: u64) -> String {
    format!("1{store_id:04}{entity_id}")
}

pub fn entity_id_from_service_id(service_id: &str) -> Result<u64, CategoryError> {
    let service_id = service_id.trim();
    let entity_part = service_id
        .get(SERVICE_ID_PREFIX_LEN..)
        .filter(|part| !part.is_empty())
        .ok_or_else(|| CategoryError::InvalidReference(service_id.to_string()))?;
    match entity_part.parse::<u64>() {
        Ok(0) | Err(_) => Err(CategoryError::InvalidReference(service_id.to_string())),
        Ok(id) => Ok(id),
    }
}


/// Shared by every url strategy that needs to turn a category facet item or
/// the current page into store categories.
#[derive(Clone)]
pub struct ItemCategoryResolver {
    repository: Arc<dyn CategoryRepository>,
    tree_root_id: u64,
    store_root_id: u64,
}

impl ItemCategoryResolver {
    pub fn new(repository: Arc<dyn CategoryRepository>, config: &Config) -> Self {
        let [tree_root_id, store_root_id] = config.reserved_category_ids();
        Self {
            repository,
            tree_root_id,
            store_root_id,
        }
    }

    pub fn is_reserved(&self, id: u64) -> bool {
        id == self.tree_root_id || id == self.store_root_id
    }

    pub fn resolve(&self, id: u64) -> Result<Category, CategoryError> {
        self.repository.get(id)
    }

    pub fn category_for_item(&self, item: &FilterItem) -> Result<Category, CategoryError> {
        let reference = item.attribute_id.as_deref().unwrap_or(item.value.as_str());
        let entity_id = entity_id_from_service_id(reference)?;
        self.repository.get(entity_id)
    }

    /// Parent worth linking to: existing, resolvable and not one of the
    /// root categories.
    pub fn linkable_parent(&self, category: &Category) -> Option<Category> {
        let parent_id = category.parent_id()?;
        if self.is_reserved(parent_id) {
            return None;
        }
        match self.repository.get(parent_id) {
            Ok(parent) => Some(parent),
            Err(e) => {
                debug!("parent of category {} unavailable: {}", category.id, e);
                None
            }
        }
    }

    /// `[parent, current]` for the category page being shown, or empty when
    /// the category sits directly below a root.
    pub fn current_category_path(&self, category_id: u64) -> Vec<u64> {
        if category_id == 0 || category_id == self.tree_root_id {
            return Vec::new();
        }
        let category = match self.repository.get(category_id) {
            Ok(category) => category,
            Err(e) => {
                debug!("no category path filter: {}", e);
                return Vec::new();
            }
        };
        let Some(parent_id) = category.parent_id() else {
            return Vec::new();
        };
        if self.is_reserved(parent_id) {
            return Vec::new();
        }
        vec![parent_id, category.id]
    }
}


#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn category(id: u64, parent_id: Option<u64>, url: &str) -> Category {
        Category {
            id,
            parent_id,
            name: format!("category {id}"),
            url: url.to_string(),
        }
    }

    /// 1 (tree root) > 2 (store root) > 10 shoes > 11 boots > 12 winter boots
    pub(crate) fn fixture_resolver() -> ItemCategoryResolver {
        let repository = InMemoryCategoryRepository::new(vec![
            category(1, None, "/"),
            category(2, Some(1), "/"),
            category(10, Some(2), "/shoes.html"),
            category(11, Some(10), "/shoes/boots.html"),
            category(12, Some(11), "/shoes/boots/winter.html"),
            category(20, Some(99), "/orphan.html"),
        ]);
        ItemCategoryResolver::new(Arc::new(repository), &Config::default())
    }

    #[test]
    fn service_ids_strip_the_store_prefix() {
        assert_eq!(service_id(1, 12), "1000112");
        assert_eq!(entity_id_from_service_id("1000112"), Ok(12));
        assert_eq!(entity_id_from_service_id(&service_id(42, 7031)), Ok(7031));
    }

    #[test]
    fn short_or_garbage_service_ids_are_invalid() {
        assert!(matches!(entity_id_from_service_id("12"), Err(CategoryError::InvalidReference(_))));
        assert!(matches!(entity_id_from_service_id("10001ab"), Err(CategoryError::InvalidReference(_))));
        assert!(matches!(entity_id_from_service_id("100010"), Err(CategoryError::InvalidReference(_))));
    }

    #[test]
    fn current_path_is_parent_and_current() {
        let resolver = fixture_resolver();
        assert_eq!(resolver.current_category_path(11), vec![10, 11]);
        assert_eq!(resolver.current_category_path(12), vec![11, 12]);
    }

    #[test]
    fn current_path_is_empty_below_roots() {
        let resolver = fixture_resolver();
        assert!(resolver.current_category_path(0).is_empty());
        assert!(resolver.current_category_path(1).is_empty());
        assert!(resolver.current_category_path(2).is_empty());
        assert!(resolver.current_category_path(10).is_empty());
    }

    #[test]
    fn unknown_current_category_gives_empty_path() {
        let resolver = fixture_resolver();
        assert!(resolver.current_category_path(404).is_empty());
    }

    #[test]
    fn linkable_parent_skips_roots_and_missing_parents() {
        let resolver = fixture_resolver();
        let shoes = resolver.resolve(10).unwrap();
        let boots = resolver.resolve(11).unwrap();
        let orphan = resolver.resolve(20).unwrap();
        assert_eq!(resolver.linkable_parent(&shoes), None);
        assert_eq!(resolver.linkable_parent(&boots).map(|c| c.id), Some(10));
        assert_eq!(resolver.linkable_parent(&orphan), None);
    }
}
