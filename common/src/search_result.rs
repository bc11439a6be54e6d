use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    #[default]
    Link,
    Checkbox,
    Slider,
    Tree,
}

/// Per facet configuration as reported by the navigation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacetSettings {
    /// Query parameter name used for this facet.
    pub url_key: String,
    pub title: String,
    pub is_multiple_select: bool,
    pub selection_type: SelectionType,
    /// Category tree facets navigate between category pages instead of
    /// changing query parameters.
    pub is_category: bool,
}

/// One selectable value of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterItem {
    pub url_key: String,
    pub value: String,
    pub title: String,
    pub is_multi_select: bool,
    /// Parameter value meaning "this filter is inactive".
    pub clean_value: String,
    pub count: u64,
    pub is_selected: bool,
    /// Service side id, only set for category items.
    pub attribute_id: Option<String>,
}

impl FilterItem {
    pub fn new(settings: &FacetSettings, value: &str) -> Self {
        Self {
            url_key: settings.url_key.clone(),
            value: value.to_string(),
            title: value.to_string(),
            is_multi_select: settings.is_multiple_select,
            ..Default::default()
        }
    }

    pub fn selected(mut self) -> Self {
        self.is_selected = true;
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    pub fn with_attribute_id(mut self, attribute_id: &str) -> Self {
        self.attribute_id = Some(attribute_id.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Facet {
    pub settings: FacetSettings,
    pub items: Vec<FilterItem>,
}

impl Facet {
    pub fn selected_items(&self) -> impl Iterator<Item = &FilterItem> {
        self.items.iter().filter(|item| item.is_selected)
    }
}

/// What the navigation service returned for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NavigationResponse {
    pub facets: Vec<Facet>,
    pub item_ids: Vec<String>,
    pub total_items: u64,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_item_copies_facet_settings() {
        let settings = FacetSettings {
            url_key: "size".to_string(),
            is_multiple_select: true,
            ..Default::default()
        };
        let item = FilterItem::new(&settings, "M").with_count(4);
        assert_eq!(item.url_key, "size");
        assert!(item.is_multi_select);
        assert_eq!(item.clean_value, "");
        assert_eq!(item.count, 4);
    }

    #[test]
    fn selection_type_uses_lowercase_names() {
        let parsed: SelectionType = serde_json::from_str("\"slider\"").unwrap();
        assert_eq!(parsed, SelectionType::Slider);
    }
}
