//! Facet link models for the layered navigation block.

use common::{
    parameter_set::ParameterSet,
    search_result::{Facet, FilterItem, SelectionType},
};
use serde::{Deserialize, Serialize};

use crate::{category::CategoryError, config::Config, url_strategy::UrlStrategy};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterItemView {
    pub title: String,
    pub value: String,
    pub count: u64,
    pub is_selected: bool,
    /// Remove link for selected items, select link otherwise.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetView {
    pub url_key: String,
    pub title: String,
    pub selection_type: SelectionType,
    pub is_multiple_select: bool,
    pub items: Vec<FilterItemView>,
    pub slider_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LayeredNavigation {
    pub facets: Vec<FacetView>,
    pub active_items: Vec<FilterItemView>,
    pub clear_url: Option<String>,
    pub use_form_filters: bool,
}

/// A facet offering a single option is noise when the store hides those.
pub fn should_show_facet(facet: &Facet, config: &Config) -> bool {
    if !config.hide_single_options {
        return true;
    }
    facet.items.len() != 1
}

pub fn build_layered_navigation(
    strategy: &dyn UrlStrategy,
    base_url: &str,
    params: &ParameterSet,
    facets: &[Facet],
    config: &Config,
) -> Result<LayeredNavigation, CategoryError> {
    let mut navigation = LayeredNavigation {
        use_form_filters: config.use_form_filters,
        ..Default::default()
    };
    let mut active: Vec<&FilterItem> = Vec::new();

    for facet in facets.iter().filter(|facet| should_show_facet(facet, config)) {
        let settings = &facet.settings;
        let mut items = Vec::with_capacity(facet.items.len());
        for item in &facet.items {
            let url = match (settings.is_category, item.is_selected) {
                (true, true) => strategy.category_remove_url(item)?,
                (true, false) => strategy.category_select_url(item)?,
                (false, true) => strategy.attribute_remove_url(base_url, params, settings, item),
                (false, false) => strategy.attribute_select_url(base_url, params, settings, item),
            };
            let view = FilterItemView {
                title: if item.title.is_empty() { item.value.clone() } else { item.title.clone() },
                value: item.value.clone(),
                count: item.count,
                is_selected: item.is_selected,
                url,
            };
            if item.is_selected {
                navigation.active_items.push(view.clone());
                // category selections are the page itself, not a query parameter
                if !settings.is_category {
                    active.push(item);
                }
            }
            items.push(view);
        }

        let slider_url = match settings.selection_type {
            SelectionType::Slider => Some(strategy.slider_url(base_url, params, settings)),
            _ => None,
        };
        navigation.facets.push(FacetView {
            url_key: settings.url_key.clone(),
            title: settings.title.clone(),
            selection_type: settings.selection_type,
            is_multiple_select: settings.is_multiple_select,
            items,
            slider_url,
        });
    }

    if !active.is_empty() {
        navigation.clear_url = Some(strategy.clear_url(base_url, params, &active));
    }
    Ok(navigation)
}
