use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tweakwise_navigation::{
    api::AppState,
    category::{CategoryRepository, InMemoryCategoryRepository, ItemCategoryResolver},
    client::TweakwiseClient,
    config::Config,
    server_extra::navigation_router,
    url_strategy::build_url_strategy,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tweakwise_navigation=info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("starting tweakwise-navigation v{}", env!("CARGO_PKG_VERSION"));

    let repository: Arc<dyn CategoryRepository> = match &config.category_tree_path {
        Some(path) => Arc::new(InMemoryCategoryRepository::from_json_file(path)?),
        None => {
            tracing::warn!("CATEGORY_TREE_PATH is not set, category pages will not resolve");
            Arc::new(InMemoryCategoryRepository::default())
        }
    };
    let resolver = ItemCategoryResolver::new(repository, &config);
    let state = AppState {
        strategy: build_url_strategy(&config, resolver.clone()),
        resolver,
        client: TweakwiseClient::new(&config),
        config: config.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("listening on {}", config.listen_addr);
    axum::serve(listener, navigation_router(state)).await?;
    Ok(())
}
