//! Remote navigation service client.

use std::future::Future;

use common::{navigation_request::NavigationRequest, search_result::NavigationResponse};

mod tweakwise_client;
pub use tweakwise_client::TweakwiseClient;


/// Executes a fully built request. Errors are opaque to the caller.
pub trait SearchClient: Send + Sync {
    fn navigate(&self, request: NavigationRequest) -> impl Future<Output = anyhow::Result<NavigationResponse>> + Send;
}
