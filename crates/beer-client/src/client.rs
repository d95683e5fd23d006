use domain::{BeerDto, BeerPagedList};
use reqwest::header::LOCATION;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ClientError, Result};

const BEER_PATH: [&str; 3] = ["api", "v1", "beer"];
const BEER_UPC_PATH: [&str; 3] = ["api", "v1", "beerUpc"];

/// Query parameters for listing beers. Unset fields are left off the query
/// string so the server defaults apply.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBeersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beer_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_inventory_on_hand: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InventoryQuery {
    show_inventory_on_hand: bool,
}

#[derive(Debug, Clone)]
pub struct BeerClient {
    client: reqwest::Client,
    base_url: String,
}

impl BeerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from BEER_SERVICE_URL, defaulting to a local service
    pub fn from_env() -> Self {
        let base_url = std::env::var("BEER_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL plus `segments`, each percent-encoded as a single path
    /// segment
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn beer_url(&self, beer_id: i32) -> Result<Url> {
        let beer_id = beer_id.to_string();
        self.url(&[BEER_PATH[0], BEER_PATH[1], BEER_PATH[2], &beer_id])
    }

    pub async fn list_beers(&self, params: &ListBeersParams) -> Result<BeerPagedList> {
        let response = self
            .client
            .get(self.url(&BEER_PATH)?)
            .query(params)
            .send()
            .await?;
        read_json(response, "beer list").await
    }

    pub async fn get_beer_by_id(&self, beer_id: i32, show_inventory_on_hand: bool) -> Result<BeerDto> {
        let response = self
            .client
            .get(self.beer_url(beer_id)?)
            .query(&InventoryQuery { show_inventory_on_hand })
            .send()
            .await?;
        read_json(response, &format!("beer {}", beer_id)).await
    }

    pub async fn get_beer_by_upc(&self, upc: &str) -> Result<BeerDto> {
        let response = self
            .client
            .get(self.url(&[BEER_UPC_PATH[0], BEER_UPC_PATH[1], BEER_UPC_PATH[2], upc])?)
            .send()
            .await?;
        read_json(response, &format!("beer with UPC {}", upc)).await
    }

    /// Create a beer and return the `Location` of the new resource
    pub async fn create_beer(&self, beer: &BeerDto) -> Result<String> {
        let response = self
            .client
            .post(self.url(&BEER_PATH)?)
            .json(beer)
            .send()
            .await?;
        let response = check_status(response, "beer").await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ClientError::InvalidResponse("missing Location header".to_string()))?;

        debug!("Created beer at {}", location);
        Ok(location.to_string())
    }

    pub async fn update_beer(&self, beer_id: i32, beer: &BeerDto) -> Result<()> {
        let response = self
            .client
            .put(self.beer_url(beer_id)?)
            .json(beer)
            .send()
            .await?;
        check_status(response, &format!("beer {}", beer_id)).await?;
        Ok(())
    }

    pub async fn delete_beer_by_id(&self, beer_id: i32) -> Result<()> {
        let response = self
            .client
            .delete(self.beer_url(beer_id)?)
            .send()
            .await?;
        check_status(response, &format!("beer {}", beer_id)).await?;
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, resource: &str) -> Result<T> {
    let response = check_status(response, resource).await?;
    response.json().await.map_err(ClientError::from)
}

async fn check_status(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(resource.to_string()));
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = BeerClient::new("http://localhost:8080/");
        assert_eq!(client.url(&BEER_PATH).unwrap().as_str(), "http://localhost:8080/api/v1/beer");
        assert_eq!(client.beer_url(7).unwrap().as_str(), "http://localhost:8080/api/v1/beer/7");
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let client = BeerClient::new("http://gateway.local/catalog");
        assert_eq!(
            client.url(&BEER_PATH).unwrap().as_str(),
            "http://gateway.local/catalog/api/v1/beer"
        );
    }

    #[test]
    fn test_upc_is_encoded_as_one_segment() {
        let client = BeerClient::new("http://localhost:8080");
        let url = client
            .url(&[BEER_UPC_PATH[0], BEER_UPC_PATH[1], BEER_UPC_PATH[2], "12/34?x#y"])
            .unwrap();

        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/beerUpc/12%2F34%3Fx%23y");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_unparseable_base_url_is_an_error() {
        let client = BeerClient::new("not a url");
        assert!(matches!(client.url(&BEER_PATH), Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_list_params_skip_unset_fields() {
        let params = ListBeersParams {
            beer_name: Some("Mango".to_string()),
            show_inventory_on_hand: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["beerName"], "Mango");
        assert_eq!(json["showInventoryOnHand"], true);
        assert!(json.get("pageNumber").is_none());
        assert!(json.get("beerStyle").is_none());
    }
}
