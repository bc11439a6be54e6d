//! axum routes in front of the navigation API.

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::{api::AppState, client::SearchClient};

mod navigation_page;
pub use navigation_page::{category_page, search_page};


pub fn navigation_router<C: SearchClient + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/category/{category_id}", get(category_page::<C>))
        .route("/search", get(search_page::<C>))
        .with_state(Arc::new(state))
}
