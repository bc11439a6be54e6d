//! Common library exports shared between the navigation layer and its callers.

extern crate serde;


pub mod search_const;
pub mod parameter_set;
pub mod navigation_request;
pub mod search_result;
pub mod category;
