//! Query parameter names with a fixed meaning on catalog and search pages.

/// Category tree selection, handled by routing rather than as an attribute.
pub const PARAM_CATEGORY: &str = "categorie";
/// Grid/list toggle of the product listing.
pub const PARAM_MODE: &str = "product_list_mode";
pub const PARAM_LIMIT: &str = "product_list_limit";
pub const PARAM_ORDER: &str = "product_list_order";
pub const PARAM_PAGE: &str = "p";
pub const PARAM_SEARCH: &str = "q";

/// Parameters that never turn into attribute filters.
pub const IGNORED_QUERY_PARAMETERS: [&str; 6] = [
    PARAM_CATEGORY,
    PARAM_ORDER,
    PARAM_LIMIT,
    PARAM_MODE,
    PARAM_SEARCH,
    PARAM_PAGE,
];

/// Placeholders the storefront substitutes in a range slider url.
pub const SLIDER_FROM_PLACEHOLDER: &str = "{{from}}";
pub const SLIDER_TO_PLACEHOLDER: &str = "{{to}}";

/// Separator between the lower and upper bound of a range value.
pub const RANGE_SEPARATOR: &str = "-";

/// Separator between ids of a category path filter.
pub const CATEGORY_TREE_SEPARATOR: &str = "-";
