use std::time::Instant;

use anyhow::Context;
use common::{
    navigation_request::{NavigationRequest, RequestKind},
    search_const::CATEGORY_TREE_SEPARATOR,
    search_result::{Facet, FacetSettings, FilterItem, NavigationResponse, SelectionType},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;

use super::SearchClient;

const ATTRIBUTE_FILTER_PREFIX: &str = "tn_fk_";
const MULTI_VALUE_SEPARATOR: &str = "|";


#[derive(Debug, Serialize, Deserialize, Default)]
pub struct RawNavigationResponse {
    #[serde(default)]
    pub facets: Vec<RawFacet>,
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default)]
    pub properties: RawProperties,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawFacet {
    pub facetsettings: RawFacetSettings,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawFacetSettings {
    pub urlkey: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ismultipleselect: bool,
    #[serde(default)]
    pub selectiontype: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawAttribute {
    pub title: String,
    #[serde(default)]
    pub isselected: bool,
    #[serde(default)]
    pub nrofresults: u64,
    #[serde(default)]
    pub attributeid: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawItem {
    pub itemno: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct RawProperties {
    #[serde(default)]
    pub nrofitems: u64,
}

impl From<RawFacet> for Facet {
    fn from(raw: RawFacet) -> Self {
        let settings = FacetSettings {
            url_key: raw.facetsettings.urlkey,
            title: raw.facetsettings.title,
            is_multiple_select: raw.facetsettings.ismultipleselect,
            selection_type: match raw.facetsettings.selectiontype.to_lowercase().as_str() {
                "checkbox" => SelectionType::Checkbox,
                "slider" => SelectionType::Slider,
                "tree" => SelectionType::Tree,
                _ => SelectionType::Link,
            },
            is_category: raw.facetsettings.source.eq_ignore_ascii_case("category"),
        };
        let items = raw
            .attributes
            .into_iter()
            .map(|attribute| {
                let mut item = FilterItem::new(&settings, &attribute.title).with_count(attribute.nrofresults);
                item.is_selected = attribute.isselected;
                item.attribute_id = match attribute.attributeid {
                    Some(serde_json::Value::String(s)) => Some(s),
                    Some(serde_json::Value::Number(n)) => Some(n.to_string()),
                    _ => None,
                };
                item
            })
            .collect();
        Facet { settings, items }
    }
}

impl From<RawNavigationResponse> for NavigationResponse {
    fn from(raw: RawNavigationResponse) -> Self {
        NavigationResponse {
            facets: raw.facets.into_iter().map(Facet::from).collect(),
            item_ids: raw.items.into_iter().map(|item| item.itemno).collect(),
            total_items: raw.properties.nrofitems,
        }
    }
}


#[derive(Debug, Clone)]
pub struct TweakwiseClient {
    http: reqwest::Client,
    server_url: String,
    key: String,
}

impl TweakwiseClient {
    pub fn new(config: &Config) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            server_url: config.server_url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
        }
    }

    pub fn endpoint(&self, kind: RequestKind) -> String {
        let path = match kind {
            RequestKind::Navigation => "navigation",
            RequestKind::Search => "navigation-search",
        };
        format!("{}/{}/{}", self.server_url, path, self.key)
    }

    pub fn query_pairs(request: &NavigationRequest) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = request.search_term() {
            pairs.push(("tn_q".to_string(), search.to_string()));
        }
        if let Some(page) = request.page() {
            pairs.push(("tn_p".to_string(), page.to_string()));
        }
        if let Some(limit) = request.limit() {
            pairs.push(("tn_ps".to_string(), limit.to_string()));
        }
        if let Some(order) = request.sort_order() {
            pairs.push(("tn_sort".to_string(), order.to_string()));
        }
        if let Some(path) = request.category_path() {
            let path = path.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(CATEGORY_TREE_SEPARATOR);
            pairs.push(("tn_cid".to_string(), path));
        }

        // one parameter per attribute, values in selection order
        let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
        for (attribute, value) in request.attribute_filters() {
            match grouped.iter_mut().find(|(name, _)| *name == attribute.as_str()) {
                Some((_, values)) => values.push(value.as_str()),
                None => grouped.push((attribute.as_str(), vec![value.as_str()])),
            }
        }
        for (attribute, values) in grouped {
            pairs.push((format!("{ATTRIBUTE_FILTER_PREFIX}{attribute}"), values.join(MULTI_VALUE_SEPARATOR)));
        }
        pairs
    }
}

impl SearchClient for TweakwiseClient {
    async fn navigate(&self, request: NavigationRequest) -> anyhow::Result<NavigationResponse> {
        let url = self.endpoint(request.kind());
        let query = Self::query_pairs(&request);
        info!("NAVIGATION REQUEST: {} {:?}", url, query);
        let t0 = Instant::now();

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query)
            .send()
            .await
            .context("Failed to reach navigation service")?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Error: {}: {}", status, response_txt);
        }
        let raw: RawNavigationResponse =
            serde_json::from_str(&response_txt).context("Failed to decode navigation response")?;

        let dt_ms = t0.elapsed().as_millis();
        info!("NAVIGATION RESPONSE: {} facets, {} items ({}ms)", raw.facets.len(), raw.items.len(), dt_ms);
        Ok(raw.into())
    }
}


#[cfg(test)]
mod tests {
    use axum::{Json, Router, extract::RawQuery, routing::get};

    use super::*;

    const RESPONSE_JSON: &str = r#"{
        "facets": [
            {
                "facetsettings": {"urlkey": "size", "title": "Size", "ismultipleselect": true, "selectiontype": "checkbox"},
                "attributes": [
                    {"title": "M", "isselected": true, "nrofresults": 3},
                    {"title": "L", "nrofresults": 5}
                ]
            },
            {
                "facetsettings": {"urlkey": "categorie", "title": "Category", "selectiontype": "tree", "source": "CATEGORY"},
                "attributes": [{"title": "Boots", "nrofresults": 7, "attributeid": 1000111}]
            }
        ],
        "items": [{"itemno": "sku-1"}, {"itemno": "sku-2"}],
        "properties": {"nrofitems": 2}
    }"#;

    fn client(server_url: &str) -> TweakwiseClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        TweakwiseClient::with_http(http, &Config {
            server_url: server_url.to_string(),
            key: "abc123".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn endpoint_depends_on_request_kind() {
        let client = client("http://tw.local/");
        assert_eq!(client.endpoint(RequestKind::Navigation), "http://tw.local/navigation/abc123");
        assert_eq!(client.endpoint(RequestKind::Search), "http://tw.local/navigation-search/abc123");
    }

    #[test]
    fn query_groups_attribute_values() {
        let mut request = NavigationRequest::navigation();
        request.add_attribute_filter("size", "M");
        request.add_attribute_filter("colour", "red");
        request.add_attribute_filter("size", "L");
        request.set_category_path(vec![10, 11]);
        request.set_page(2);
        request.set_limit(24);
        request.set_sort_order("price");

        let pairs = TweakwiseClient::query_pairs(&request);
        let expected: Vec<(String, String)> = [
            ("tn_p", "2"),
            ("tn_ps", "24"),
            ("tn_sort", "price"),
            ("tn_cid", "10-11"),
            ("tn_fk_size", "M|L"),
            ("tn_fk_colour", "red"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn search_query_carries_the_term() {
        let mut request = NavigationRequest::search();
        request.set_search("winter boots");
        assert_eq!(TweakwiseClient::query_pairs(&request), vec![("tn_q".to_string(), "winter boots".to_string())]);
    }

    #[test]
    fn raw_response_maps_to_facets() {
        let raw: RawNavigationResponse = serde_json::from_str(RESPONSE_JSON).unwrap();
        let response = NavigationResponse::from(raw);
        assert_eq!(response.item_ids, vec!["sku-1", "sku-2"]);
        assert_eq!(response.total_items, 2);

        let size = &response.facets[0];
        assert_eq!(size.settings.selection_type, SelectionType::Checkbox);
        assert!(size.settings.is_multiple_select);
        assert_eq!(size.selected_items().count(), 1);
        assert!(size.items[1].is_multi_select);

        let category = &response.facets[1];
        assert!(category.settings.is_category);
        assert_eq!(category.items[0].attribute_id.as_deref(), Some("1000111"));
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn navigate_sends_query_and_decodes_response() {
        let router = Router::new().route(
            "/navigation/abc123",
            get(|RawQuery(query): RawQuery| async move {
                assert_eq!(query.as_deref(), Some("tn_cid=10-11&tn_fk_size=M"));
                Json(serde_json::from_str::<serde_json::Value>(RESPONSE_JSON).unwrap())
            }),
        );
        let client = client(&serve(router).await);

        let mut request = NavigationRequest::navigation();
        request.add_attribute_filter("size", "M");
        request.set_category_path(vec![10, 11]);
        let response = client.navigate(request).await.unwrap();
        assert_eq!(response.facets.len(), 2);
        assert_eq!(response.item_ids.len(), 2);
    }

    #[tokio::test]
    async fn navigate_propagates_remote_errors() {
        let router = Router::new().route(
            "/navigation-search/abc123",
            get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let client = client(&serve(router).await);

        let error = client.navigate(NavigationRequest::search()).await.unwrap_err();
        assert!(error.to_string().contains("503"));
        assert!(error.to_string().contains("maintenance"));
    }
}
