//! Runtime configuration read from the environment.

use std::{path::PathBuf, str::FromStr};

use anyhow::Context;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlStrategyKind {
    /// Filters live in the query string: `?colour=red&size[]=M`.
    #[default]
    QueryParameter,
}

impl FromStr for UrlStrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "query_parameter" | "queryparameter" | "query" => Ok(Self::QueryParameter),
            other => anyhow::bail!("unknown url strategy: {other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_url: String,
    pub key: String,
    /// Storefront base url links are rendered against.
    pub base_url: String,
    pub listen_addr: String,
    pub url_strategy: UrlStrategyKind,
    /// Catalog tree root, never a real category.
    pub category_tree_root_id: u64,
    /// Root category of the store being served.
    pub store_root_category_id: u64,
    pub hide_single_options: bool,
    pub use_form_filters: bool,
    /// Added to the built in ignored parameters.
    pub ignored_query_parameters: Vec<String>,
    pub category_tree_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "https://gateway.tweakwisenavigator.net".to_string(),
            key: String::new(),
            base_url: "http://127.0.0.1:3000".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            url_strategy: UrlStrategyKind::default(),
            category_tree_root_id: 1,
            store_root_category_id: 2,
            hide_single_options: false,
            use_form_filters: false,
            ignored_query_parameters: Vec::new(),
            category_tree_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Config::default();
        if let Some(server_url) = lookup("TWEAKWISE_SERVER_URL") {
            config.server_url = server_url.trim_end_matches('/').to_string();
        }
        if let Some(key) = lookup("TWEAKWISE_KEY") {
            config.key = key;
        }
        if let Some(base_url) = lookup("BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(listen_addr) = lookup("LISTEN_ADDR") {
            config.listen_addr = listen_addr;
        }
        if let Some(strategy) = lookup("URL_STRATEGY") {
            config.url_strategy = strategy.parse().context("URL_STRATEGY is invalid")?;
        }
        if let Some(id) = lookup("CATEGORY_TREE_ROOT_ID") {
            config.category_tree_root_id = id.trim().parse().context("CATEGORY_TREE_ROOT_ID is not a number")?;
        }
        if let Some(id) = lookup("STORE_ROOT_CATEGORY_ID") {
            config.store_root_category_id = id.trim().parse().context("STORE_ROOT_CATEGORY_ID is not a number")?;
        }
        if let Some(flag) = lookup("HIDE_SINGLE_OPTIONS") {
            config.hide_single_options = parse_flag(&flag).context("HIDE_SINGLE_OPTIONS is invalid")?;
        }
        if let Some(flag) = lookup("USE_FORM_FILTERS") {
            config.use_form_filters = parse_flag(&flag).context("USE_FORM_FILTERS is invalid")?;
        }
        if let Some(names) = lookup("IGNORED_QUERY_PARAMETERS") {
            config.ignored_query_parameters = names
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
        }
        if let Some(path) = lookup("CATEGORY_TREE_PATH") {
            config.category_tree_path = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    /// Category ids that are never linked to or filtered on.
    pub fn reserved_category_ids(&self) -> [u64; 2] {
        [self.category_tree_root_id, self.store_root_category_id]
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other:?}"),
    }
}
