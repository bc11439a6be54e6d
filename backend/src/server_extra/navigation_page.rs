use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::{AppState, CategoryPageNotFound, NavigationPage, navigate_category, navigate_search},
    client::SearchClient,
};


pub async fn category_page<C: SearchClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path(category_id): Path<u64>,
    RawQuery(query): RawQuery,
) -> Response {
    let query = query.unwrap_or_default();
    into_response("category_page", navigate_category(&state, category_id, &query).await)
}

pub async fn search_page<C: SearchClient + 'static>(State(state): State<Arc<AppState<C>>>, RawQuery(query): RawQuery) -> Response {
    let query = query.unwrap_or_default();
    into_response("search_page", navigate_search(&state, &query).await)
}

fn into_response(handler: &str, result: anyhow::Result<NavigationPage>) -> Response {
    match result {
        Ok(page) => Json(page).into_response(),
        Err(e) => {
            tracing::error!("{}: request failed: {:#?}", handler, e);
            let status = match e.downcast_ref::<CategoryPageNotFound>() {
                Some(_) => StatusCode::NOT_FOUND,
                None => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Body::from(e.to_string())).into_response()
        }
    }
}
