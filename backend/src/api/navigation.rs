use std::sync::Arc;

use anyhow::Context;
use common::{
    navigation_request::NavigationRequest,
    parameter_set::ParameterSet,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    category::{CategoryError, ItemCategoryResolver},
    client::SearchClient,
    config::Config,
    layered_navigation::{LayeredNavigation, build_layered_navigation},
    url_strategy::UrlStrategy,
};


/// Everything a request handler needs; shared read-only between requests.
pub struct AppState<C> {
    pub config: Config,
    pub resolver: ItemCategoryResolver,
    pub strategy: Arc<dyn UrlStrategy>,
    pub client: C,
}

/// The category page itself does not exist.
#[derive(Debug, thiserror::Error)]
#[error("category {category_id} not found")]
pub struct CategoryPageNotFound {
    pub category_id: u64,
    #[source]
    pub source: CategoryError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPage {
    pub item_ids: Vec<String>,
    pub total_items: u64,
    pub navigation: LayeredNavigation,
}

/// Category page: filters from the query, category path from the page.
pub async fn navigate_category<C: SearchClient>(state: &AppState<C>, category_id: u64, query: &str) -> anyhow::Result<NavigationPage> {
    let category = state
        .resolver
        .resolve(category_id)
        .map_err(|source| CategoryPageNotFound { category_id, source })?;
    let params = ParameterSet::from_query_string(query);
    let category_path = state.strategy.current_category_path(category_id);
    let base_url = format!("{}{}", state.config.base_url, category.url);
    info!("Category page {} ({}) with {} parameters", category.id, category.url, params.len());

    navigate(state, NavigationRequest::navigation(), &base_url, &params, &category_path).await
}

pub async fn navigate_search<C: SearchClient>(state: &AppState<C>, query: &str) -> anyhow::Result<NavigationPage> {
    let params = ParameterSet::from_query_string(query);
    let base_url = format!("{}/search", state.config.base_url);
    info!("Search page with {} parameters", params.len());

    navigate(state, NavigationRequest::search(), &base_url, &params, &[]).await
}

async fn navigate<C: SearchClient>(
    state: &AppState<C>,
    mut request: NavigationRequest,
    base_url: &str,
    params: &ParameterSet,
    category_path: &[u64],
) -> anyhow::Result<NavigationPage> {
    state.strategy.apply(params, category_path, &mut request);
    let response = state.client.navigate(request).await?;

    let navigation = build_layered_navigation(state.strategy.as_ref(), base_url, params, &response.facets, &state.config)
        .context("Failed to build facet links")?;
    Ok(NavigationPage {
        item_ids: response.item_ids,
        total_items: response.total_items,
        navigation,
    })
}
