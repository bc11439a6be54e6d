//! Translation between storefront urls and navigation requests.

use std::sync::Arc;

use common::{
    navigation_request::NavigationRequest,
    parameter_set::ParameterSet,
    search_const::{SLIDER_FROM_PLACEHOLDER, SLIDER_TO_PLACEHOLDER},
    search_result::{FacetSettings, FilterItem},
};

use crate::{
    category::{CategoryError, ItemCategoryResolver},
    config::{Config, UrlStrategyKind},
};

mod query_parameter;
pub use query_parameter::QueryParameterStrategy;


/// Fills a navigation request from the current page parameters.
pub trait FilterApplier {
    fn apply(&self, params: &ParameterSet, current_category_path: &[u64], request: &mut NavigationRequest);

    /// Category path for the category page with the given id.
    fn current_category_path(&self, category_id: u64) -> Vec<u64>;
}

/// Builds the parameters and urls behind facet links.
///
/// The `*_params` methods return parameter sets; the `*_url` methods render
/// them on top of the current query.
pub trait UrlStrategy: FilterApplier + Send + Sync {
    fn attribute_select_params(&self, current: &ParameterSet, settings: &FacetSettings, item: &FilterItem) -> ParameterSet;

    fn attribute_remove_params(&self, current: &ParameterSet, settings: &FacetSettings, item: &FilterItem) -> ParameterSet;

    /// Fragment with a `{{from}}-{{to}}` template for range sliders.
    fn slider_params(&self, settings: &FacetSettings) -> ParameterSet;

    /// Fragment resetting every active item to its clean value.
    fn clear_params(&self, active_items: &[&FilterItem]) -> ParameterSet;

    fn category_select_url(&self, item: &FilterItem) -> Result<String, CategoryError>;

    fn category_remove_url(&self, item: &FilterItem) -> Result<String, CategoryError>;

    fn attribute_select_url(&self, base_url: &str, current: &ParameterSet, settings: &FacetSettings, item: &FilterItem) -> String {
        render_url(base_url, &self.attribute_select_params(current, settings, item))
    }

    fn attribute_remove_url(&self, base_url: &str, current: &ParameterSet, settings: &FacetSettings, item: &FilterItem) -> String {
        render_url(base_url, &self.attribute_remove_params(current, settings, item))
    }

    fn slider_url(&self, base_url: &str, current: &ParameterSet, settings: &FacetSettings) -> String {
        let url = render_url(base_url, &current.merged_with(&self.slider_params(settings)));
        // the storefront substitutes the raw placeholders
        url.replace(&encode_component(SLIDER_FROM_PLACEHOLDER), SLIDER_FROM_PLACEHOLDER)
            .replace(&encode_component(SLIDER_TO_PLACEHOLDER), SLIDER_TO_PLACEHOLDER)
    }

    fn clear_url(&self, base_url: &str, current: &ParameterSet, active_items: &[&FilterItem]) -> String {
        render_url(base_url, &current.merged_with(&self.clear_params(active_items)))
    }
}

pub fn build_url_strategy(config: &Config, resolver: ItemCategoryResolver) -> Arc<dyn UrlStrategy> {
    match config.url_strategy {
        UrlStrategyKind::QueryParameter => Arc::new(QueryParameterStrategy::new(resolver, &config.ignored_query_parameters)),
    }
}

/// Puts `params` as the query of `base_url`, replacing any query it had.
pub fn render_url(base_url: &str, params: &ParameterSet) -> String {
    let base = base_url.split(['?', '#']).next().unwrap_or_default();
    let query = params.to_query_string();
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}

fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_existing_query() {
        let params = ParameterSet::new().with("colour", "red");
        assert_eq!(render_url("/shoes.html?old=1#top", &params), "/shoes.html?colour=red");
        assert_eq!(render_url("/shoes.html", &ParameterSet::new()), "/shoes.html");
    }

    #[test]
    fn render_drops_inactive_parameters() {
        let params = ParameterSet::new().with("colour", "").with("size", vec!["M"]);
        assert_eq!(render_url("https://shop.test/c", &params), "https://shop.test/c?size%5B%5D=M");
    }
}
