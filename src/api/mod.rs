use async_trait::async_trait;
use reqwest::{
    Client,
    Url,
};
use serde::{
    de::DeserializeOwned,
    Deserialize,
};
use tracing::info;

use crate::{
    core::{
        http,
        ApiConfig,
        ApiError,
        Drink,
        ShakeItError,
    },
    filters::FilterKind,
};

pub mod images;

const LIST_PATH: &str = "list.php";
const SEARCH_PATH: &str = "search.php";
const LIST_VALUE: &str = "list";
const FIRST_LETTER_KEY: &str = "f";

/// Every request the client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    FacetList(FilterKind),
    DrinksByFirstLetter(char),
}

impl Endpoint {
    fn path(&self) -> &'static str {
        match self {
            Endpoint::FacetList(_) => LIST_PATH,
            Endpoint::DrinksByFirstLetter(_) => SEARCH_PATH,
        }
    }

    fn query(&self) -> (&'static str, String) {
        match self {
            Endpoint::FacetList(kind) => (kind.query_key(), LIST_VALUE.to_string()),
            Endpoint::DrinksByFirstLetter(letter) => (FIRST_LETTER_KEY, letter.to_string()),
        }
    }

    pub fn url(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = base.join(self.path()).map_err(|_| ApiError::InvalidUrl)?;
        let (key, value) = self.query();
        url.query_pairs_mut().append_pair(key, &value);
        Ok(url)
    }
}

/// Envelope shared by every endpoint. The API answers `"drinks": null` when
/// nothing matches.
#[derive(Debug, Deserialize)]
pub struct BaseResponse<T> {
    pub drinks: Option<Vec<T>>,
}

impl<T> BaseResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        self.drinks.unwrap_or_default()
    }
}

/// A single row of a `list.php` response. Each facet names its field
/// differently.
#[derive(Debug, Deserialize)]
struct FacetValue {
    #[serde(
        alias = "strCategory",
        alias = "strAlcoholic",
        alias = "strGlass",
        alias = "strIngredient1"
    )]
    value: String,
}

#[async_trait]
pub trait NetworkProvider: Send + Sync + 'static {
    async fn facet_values(&self, kind: FilterKind) -> Result<Vec<String>, ApiError>;

    async fn drinks_starting_with(&self, letter: char) -> Result<Vec<Drink>, ApiError>;
}

/// [`NetworkProvider`] backed by the real HTTP API.
#[derive(Debug, Clone)]
pub struct NetworkManager {
    client: Client,
    base_url: Url,
}

impl NetworkManager {
    pub fn new(config: &ApiConfig) -> Result<Self, ShakeItError> {
        config.validate()?;
        Ok(Self { client: http::http_client(config)?, base_url: config.base_url()? })
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Vec<T>, ApiError> {
        let url = endpoint.url(&self.base_url)?;
        let body = http::get_bytes(&self.client, url).await?;
        let response: BaseResponse<T> = http::decode(&body)?;
        Ok(response.into_items())
    }
}

#[async_trait]
impl NetworkProvider for NetworkManager {
    async fn facet_values(&self, kind: FilterKind) -> Result<Vec<String>, ApiError> {
        let values: Vec<FacetValue> = self.fetch(Endpoint::FacetList(kind)).await?;
        info!(facet = ?kind, count = values.len(), "facet values loaded");
        Ok(values.into_iter().map(|v| v.value).collect())
    }

    async fn drinks_starting_with(&self, letter: char) -> Result<Vec<Drink>, ApiError> {
        let drinks: Vec<Drink> = self.fetch(Endpoint::DrinksByFirstLetter(letter)).await?;
        info!(%letter, count = drinks.len(), "drink page loaded");
        Ok(drinks)
    }
}
