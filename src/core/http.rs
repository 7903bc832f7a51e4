use reqwest::{
    header::ACCEPT,
    Client,
    Response,
    Url,
};
use serde::de::DeserializeOwned;
use tracing::{
    debug,
    warn,
};

use super::{
    config::ApiConfig,
    ApiError,
    ShakeItError,
};

pub fn http_client(config: &ApiConfig) -> Result<Client, ShakeItError> {
    let client = Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// GET `url` and return the raw body. Transport failures and non-2xx
/// statuses both surface as [`ApiError::InvalidData`].
pub async fn get_bytes(client: &Client, url: Url) -> Result<Vec<u8>, ApiError> {
    debug!(%url, "GET");

    let response = client.get(url.clone()).header(ACCEPT, "application/json").send().await.map_err(
        |error| {
            warn!(%url, %error, "request failed");
            ApiError::InvalidData
        },
    )?;

    ensure_success(&response)?;

    let body = response.bytes().await.map_err(|error| {
        warn!(%url, %error, "failed to read response body");
        ApiError::InvalidData
    })?;

    Ok(body.to_vec())
}

pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|error| {
        warn!(%error, "decoding error");
        ApiError::DecodingError
    })
}

fn ensure_success(resp: &Response) -> Result<(), ApiError> {
    if !resp.status().is_success() {
        warn!(status = %resp.status(), url = %resp.url(), "HTTP error");
        return Err(ApiError::InvalidData);
    }
    Ok(())
}
