//! Facet driven query translation for Tweakwise navigation.
//!
//! Storefront query parameters are turned into a [`NavigationRequest`] by a
//! [`url_strategy::FilterApplier`], sent to the navigation service, and the
//! returned facets are turned back into select/remove links by a
//! [`url_strategy::UrlStrategy`].
//!
//! [`NavigationRequest`]: common::navigation_request::NavigationRequest

pub mod api;
pub mod category;
pub mod client;
pub mod config;
pub mod layered_navigation;
pub mod server_extra;
pub mod url_strategy;
