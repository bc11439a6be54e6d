//! Category lookups by store entity id.

use std::{collections::HashMap, path::Path};

use anyhow::Context;
use common::category::Category;

use super::CategoryError;


pub trait CategoryRepository: Send + Sync {
    fn get(&self, id: u64) -> Result<Category, CategoryError>;
}

/// Category tree held in memory, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    categories: HashMap<u64, Category>,
}

impl InMemoryCategoryRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: categories.into_iter().map(|category| (category.id, category)).collect(),
        }
    }

    /// Reads a JSON array of categories.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read category tree {}", path.display()))?;
        let categories: Vec<Category> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse category tree {}", path.display()))?;
        tracing::info!("Loaded {} categories from {}", categories.len(), path.display());
        Ok(Self::new(categories))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl CategoryRepository for InMemoryCategoryRepository {
    fn get(&self, id: u64) -> Result<Category, CategoryError> {
        self.categories.get(&id).cloned().ok_or(CategoryError::NotFound(id))
    }
}


#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_tree_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 2, "parent_id": 1, "name": "Default", "url": "/"}},
                {{"id": 10, "parent_id": 2, "url": "/shoes.html"}}
            ]"#
        )
        .unwrap();

        let repository = InMemoryCategoryRepository::from_json_file(file.path()).unwrap();
        assert_eq!(repository.len(), 2);
        assert_eq!(repository.get(10).unwrap().url, "/shoes.html");
        assert_eq!(repository.get(11), Err(CategoryError::NotFound(11)));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(InMemoryCategoryRepository::from_json_file(file.path()).is_err());
    }
}
