//! Navigation API: storefront parameters in, products and facet links out.

pub(crate) mod navigation;
pub use navigation::{AppState, CategoryPageNotFound, NavigationPage, navigate_category, navigate_search};
