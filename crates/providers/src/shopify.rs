//! Shopify Storefront catalog gateway.
//!
//! Fetches one page of published products over the Storefront GraphQL API,
//! filters them to the sellable category and maps them into normalized
//! `ProductRecord`s. Every failure mode (network, HTTP status, GraphQL
//! errors, malformed payload) is converted to `ProviderError` at this
//! boundary; nothing ever panics or propagates a raw provider payload.

use async_trait::async_trait;
use mostrador_agent::catalog::CatalogGateway;
use mostrador_core::config::ShopConfig;
use mostrador_core::domain::ProductRecord;
use mostrador_core::errors::ProviderError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const PRODUCTS_QUERY: &str = r#"
query Products($first: Int!) {
  products(first: $first) {
    edges {
      node {
        title
        handle
        productType
        availableForSale
        priceRange {
          minVariantPrice {
            amount
            currencyCode
          }
        }
      }
    }
  }
}
"#;

pub struct ShopifyCatalogGateway {
    endpoint: String,
    base_url: String,
    storefront_token: SecretString,
    page_size: u32,
    sellable_category: String,
    client: reqwest::Client,
}

impl ShopifyCatalogGateway {
    pub fn new(config: &ShopConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            endpoint: format!("{base_url}/api/{}/graphql.json", config.api_version),
            base_url,
            storefront_token: config.storefront_token.clone(),
            page_size: config.page_size,
            sellable_category: config.sellable_category.clone(),
            client,
        })
    }

    /// Structured category check when the provider supplies `productType`;
    /// title-substring heuristic (singular form of the category) otherwise.
    fn is_sellable(&self, node: &ProductNode) -> bool {
        let product_type = node.product_type.trim();
        if !product_type.is_empty() {
            return product_type.eq_ignore_ascii_case(&self.sellable_category);
        }

        node.title.to_lowercase().contains(&self.category_title_keyword())
    }

    fn category_title_keyword(&self) -> String {
        let lowered = self.sellable_category.to_lowercase();
        lowered.strip_suffix('s').map(str::to_string).unwrap_or(lowered)
    }

    fn map_products(&self, data: ProductsData) -> Vec<ProductRecord> {
        data.products
            .edges
            .into_iter()
            .map(|edge| edge.node)
            .filter(|node| self.is_sellable(node))
            .map(|node| ProductRecord {
                url: format!("{}/products/{}", self.base_url, node.handle),
                title: node.title,
                price: format!(
                    "{} {}",
                    node.price_range.min_variant_price.amount,
                    node.price_range.min_variant_price.currency_code
                ),
                available: node.available_for_sale,
            })
            .collect()
    }
}

#[async_trait]
impl CatalogGateway for ShopifyCatalogGateway {
    async fn fetch_catalog(&self) -> Result<Vec<ProductRecord>, ProviderError> {
        let body = json!({
            "query": PRODUCTS_QUERY,
            "variables": { "first": self.page_size },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Shopify-Storefront-Access-Token", self.storefront_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|error| ProviderError::Network(error.to_string()))?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            return Err(ProviderError::Auth);
        }
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, message });
        }

        let payload: GraphQlResponse = response
            .json()
            .await
            .map_err(|error| ProviderError::MalformedPayload(error.to_string()))?;

        if let Some(errors) = payload.errors.filter(|errors| !errors.is_empty()) {
            let message =
                errors.into_iter().map(|error| error.message).collect::<Vec<_>>().join("; ");
            return Err(ProviderError::Api { status, message });
        }

        let data = payload
            .data
            .ok_or_else(|| ProviderError::MalformedPayload("missing data field".to_string()))?;

        let products = self.map_products(data);
        debug!(product_count = products.len(), "catalog page fetched");
        Ok(products)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ProductsData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: ProductConnection,
}

#[derive(Debug, Deserialize)]
struct ProductConnection {
    edges: Vec<ProductEdge>,
}

#[derive(Debug, Deserialize)]
struct ProductEdge {
    node: ProductNode,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    title: String,
    handle: String,
    #[serde(rename = "productType", default)]
    product_type: String,
    #[serde(rename = "availableForSale", default)]
    available_for_sale: Option<bool>,
    #[serde(rename = "priceRange")]
    price_range: PriceRange,
}

#[derive(Debug, Deserialize)]
struct PriceRange {
    #[serde(rename = "minVariantPrice")]
    min_variant_price: Money,
}

#[derive(Debug, Deserialize)]
struct Money {
    amount: String,
    #[serde(rename = "currencyCode")]
    currency_code: String,
}

#[cfg(test)]
mod tests {
    use mostrador_core::config::{AppConfig, ShopConfig};

    use super::{GraphQlResponse, ShopifyCatalogGateway};

    fn shop_config() -> ShopConfig {
        let mut shop = AppConfig::default().shop;
        shop.base_url = "https://tienda.example".to_string();
        shop.storefront_token = "shpat-test".to_string().into();
        shop
    }

    fn gateway() -> ShopifyCatalogGateway {
        ShopifyCatalogGateway::new(&shop_config()).expect("client builds")
    }

    fn page_fixture() -> GraphQlResponse {
        serde_json::from_str(
            r#"{
                "data": {
                    "products": {
                        "edges": [
                            {"node": {
                                "title": "Llavero X",
                                "handle": "llavero-x",
                                "productType": "Llaveros",
                                "availableForSale": true,
                                "priceRange": {"minVariantPrice": {"amount": "150.0", "currencyCode": "DOP"}}
                            }},
                            {"node": {
                                "title": "Placa acrílica grande",
                                "handle": "placa-acrilica",
                                "productType": "Acrílicos",
                                "availableForSale": true,
                                "priceRange": {"minVariantPrice": {"amount": "900.0", "currencyCode": "DOP"}}
                            }},
                            {"node": {
                                "title": "Llavero dragón",
                                "handle": "llavero-dragon",
                                "productType": "",
                                "availableForSale": false,
                                "priceRange": {"minVariantPrice": {"amount": "250.0", "currencyCode": "DOP"}}
                            }},
                            {"node": {
                                "title": "Taza del equipo",
                                "handle": "taza-equipo",
                                "productType": "",
                                "priceRange": {"minVariantPrice": {"amount": "400.0", "currencyCode": "DOP"}}
                            }}
                        ]
                    }
                }
            }"#,
        )
        .expect("fixture parses")
    }

    #[test]
    fn maps_and_filters_to_the_sellable_category() {
        let gateway = gateway();
        let data = page_fixture().data.expect("data");
        let products = gateway.map_products(data);

        // structured type match keeps "Llavero X", drops the acrylic line;
        // title heuristic keeps "Llavero dragón", drops the mug.
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Llavero X");
        assert_eq!(products[0].price, "150.0 DOP");
        assert_eq!(products[0].available, Some(true));
        assert_eq!(products[0].url, "https://tienda.example/products/llavero-x");
        assert_eq!(products[1].title, "Llavero dragón");
        assert_eq!(products[1].available, Some(false));
    }

    #[test]
    fn graphql_error_payloads_parse() {
        let payload: GraphQlResponse = serde_json::from_str(
            r#"{"errors": [{"message": "Invalid API key or access token"}]}"#,
        )
        .expect("parses");

        assert!(payload.data.is_none());
        assert_eq!(payload.errors.expect("errors")[0].message, "Invalid API key or access token");
    }

    #[test]
    fn empty_page_maps_to_empty_catalog() {
        let gateway = gateway();
        let payload: GraphQlResponse =
            serde_json::from_str(r#"{"data": {"products": {"edges": []}}}"#).expect("parses");

        assert!(gateway.map_products(payload.data.expect("data")).is_empty());
    }

    #[test]
    fn category_keyword_falls_back_to_singular_title_match() {
        let gateway = gateway();
        assert_eq!(gateway.category_title_keyword(), "llavero");
    }
}
