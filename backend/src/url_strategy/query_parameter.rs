//! Filters as plain query parameters, `?colour=red&size[]=M&size[]=L`.

use common::{
    navigation_request::NavigationRequest,
    parameter_set::{ParamValue, ParameterSet},
    search_const::{IGNORED_QUERY_PARAMETERS, PARAM_LIMIT, PARAM_ORDER, PARAM_PAGE, PARAM_SEARCH, RANGE_SEPARATOR, SLIDER_FROM_PLACEHOLDER, SLIDER_TO_PLACEHOLDER},
    search_result::{FacetSettings, FilterItem},
};
use tracing::debug;

use crate::category::{CategoryError, ItemCategoryResolver};

use super::{FilterApplier, UrlStrategy};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Select,
    Remove,
}

pub struct QueryParameterStrategy {
    resolver: ItemCategoryResolver,
    /// Lowercased parameter names that are not attribute filters.
    ignored_parameters: Vec<String>,
}

impl QueryParameterStrategy {
    pub fn new(resolver: ItemCategoryResolver, extra_ignored_parameters: &[String]) -> Self {
        let ignored_parameters = IGNORED_QUERY_PARAMETERS
            .iter()
            .map(|name| name.to_string())
            .chain(extra_ignored_parameters.iter().map(|name| name.to_lowercase()))
            .collect();
        Self {
            resolver,
            ignored_parameters,
        }
    }

    fn is_ignored(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.ignored_parameters.iter().any(|ignored| *ignored == name)
    }

    /// Values currently selected for the facet. Multi select facets always
    /// get a list, a lone value is lifted into one.
    fn request_values(current: &ParameterSet, settings: &FacetSettings) -> Vec<String> {
        match current.get(&settings.url_key) {
            None => Vec::new(),
            Some(value) if value.is_empty() => Vec::new(),
            Some(value) => value.values(),
        }
    }

    fn with_selection(current: &ParameterSet, settings: &FacetSettings, item: &FilterItem, selection: Selection) -> ParameterSet {
        let url_key = settings.url_key.as_str();
        let mut params = current.clone();

        if !settings.is_multiple_select {
            let value = match selection {
                Selection::Select => item.value.clone(),
                Selection::Remove => item.clean_value.clone(),
            };
            params.set(url_key, ParamValue::Single(value));
            return params;
        }

        let mut values = Self::request_values(current, settings);
        match selection {
            Selection::Select => {
                values.push(item.value.clone());
                values = unique(values);
            }
            Selection::Remove => {
                if let Some(index) = values.iter().position(|value| *value == item.value) {
                    values.remove(index);
                }
            }
        }

        if values.is_empty() {
            params.remove(url_key);
        } else {
            params.set(url_key, ParamValue::Multiple(values));
        }
        params
    }
}

/// Order preserving, first occurrence wins.
fn unique(values: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !result.contains(&value) {
            result.push(value);
        }
    }
    result
}

fn positive_number(params: &ParameterSet, key: &str) -> Option<u32> {
    let raw = params.first_value(key)?;
    match raw.trim().parse::<u32>() {
        Ok(number) if number > 0 => Some(number),
        _ => {
            debug!("ignoring malformed {} parameter {:?}", key, raw);
            None
        }
    }
}

impl FilterApplier for QueryParameterStrategy {
    fn apply(&self, params: &ParameterSet, current_category_path: &[u64], request: &mut NavigationRequest) {
        for (attribute, value) in params.iter() {
            if self.is_ignored(attribute) {
                continue;
            }
            for value in value.values() {
                request.add_attribute_filter(attribute, &value);
            }
        }

        if let Some(order) = params.first_value(PARAM_ORDER) {
            request.set_sort_order(order);
        }
        if let Some(page) = positive_number(params, PARAM_PAGE) {
            request.set_page(page);
        }
        if let Some(limit) = positive_number(params, PARAM_LIMIT) {
            request.set_limit(limit);
        }

        if request.is_search() {
            if let Some(search) = params.first_value(PARAM_SEARCH) {
                request.set_search(search);
            }
        } else if !current_category_path.is_empty() {
            request.set_category_path(current_category_path.to_vec());
        }
    }

    fn current_category_path(&self, category_id: u64) -> Vec<u64> {
        self.resolver.current_category_path(category_id)
    }
}

impl UrlStrategy for QueryParameterStrategy {
    fn attribute_select_params(&self, current: &ParameterSet, settings: &FacetSettings, item: &FilterItem) -> ParameterSet {
        Self::with_selection(current, settings, item, Selection::Select)
    }

    fn attribute_remove_params(&self, current: &ParameterSet, settings: &FacetSettings, item: &FilterItem) -> ParameterSet {
        Self::with_selection(current, settings, item, Selection::Remove)
    }

    fn slider_params(&self, settings: &FacetSettings) -> ParameterSet {
        let template = format!("{SLIDER_FROM_PLACEHOLDER}{RANGE_SEPARATOR}{SLIDER_TO_PLACEHOLDER}");
        ParameterSet::new().with(&settings.url_key, template)
    }

    fn clear_params(&self, active_items: &[&FilterItem]) -> ParameterSet {
        let mut params = ParameterSet::new();
        for item in active_items {
            params.set(&item.url_key, item.clean_value.as_str());
        }
        params
    }

    fn category_select_url(&self, item: &FilterItem) -> Result<String, CategoryError> {
        Ok(self.resolver.category_for_item(item)?.url)
    }

    fn category_remove_url(&self, item: &FilterItem) -> Result<String, CategoryError> {
        let category = self.resolver.category_for_item(item)?;
        match self.resolver.linkable_parent(&category) {
            Some(parent) => Ok(parent.url),
            None => Ok(category.url),
        }
    }
}
