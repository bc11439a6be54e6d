use serde::{Deserialize, Serialize};


/// A node of the store's category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub name: String,
    pub url: String,
}

impl Category {
    /// Parent id, treating `0` as "no parent".
    pub fn parent_id(&self) -> Option<u64> {
        self.parent_id.filter(|id| *id != 0)
    }
}
