use reqwest::{Method, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::resources::{Categories, Items, Purchases, Stocks, Stores};

/// Connection to one stocktrack service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    pub fn stores(&self) -> Stores<'_> {
        Stores::new(self)
    }

    pub fn items(&self) -> Items<'_> {
        Items::new(self)
    }

    pub fn stocks(&self) -> Stocks<'_> {
        Stocks::new(self)
    }

    pub fn purchases(&self) -> Purchases<'_> {
        Purchases::new(self)
    }

    /// `true` when `/health` answers 2xx.
    pub async fn check_connectivity(&self) -> bool {
        match self.url(&["health"]) {
            Ok(url) => self
                .http
                .get(url)
                .send()
                .await
                .is_ok_and(|r| r.status().is_success()),
            Err(_) => false,
        }
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        self.request::<(), T>(Method::GET, segments, query, None).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::POST, segments, &[], Some(body)).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::PUT, segments, &[], Some(body)).await
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), ClientError> {
        self.request::<(), ()>(Method::DELETE, segments, &[], None).await
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let url = self.url(segments)?;
        tracing::debug!(%method, %url, "api request");

        let mut req = self.http.request(method, url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "api request failed");
            return Err(ClientError::from_response(status.as_u16(), &bytes));
        }

        decode(status, &bytes)
    }
}

/// `204 No Content` and empty bodies decode as JSON `null`, which is what `()`
/// deserializes from.
fn decode<T: DeserializeOwned>(status: reqwest::StatusCode, bytes: &[u8]) -> Result<T, ClientError> {
    let bytes = if status == reqwest::StatusCode::NO_CONTENT || bytes.is_empty() {
        b"null".as_slice()
    } else {
        bytes
    };
    serde_json::from_slice(bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn segments_are_joined_and_encoded() {
        let c = client("http://localhost:8080");
        let url = c.url(&["categories", "name", "Frozen food"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/categories/name/Frozen%20food");
    }

    #[test]
    fn base_path_is_kept() {
        let c = client("http://example.test/api/");
        let url = c.url(&["items", "7"]).unwrap();
        assert_eq!(url.as_str(), "http://example.test/api/items/7");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            ApiClient::new(&ClientConfig::new("not a url")),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::new(&ClientConfig::new("mailto:ops@example.test")),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn empty_bodies_decode_as_unit() {
        decode::<()>(reqwest::StatusCode::NO_CONTENT, b"").unwrap();
        decode::<()>(reqwest::StatusCode::OK, b"").unwrap();
        assert!(matches!(
            decode::<Vec<i64>>(reqwest::StatusCode::OK, b""),
            Err(ClientError::Decode(_))
        ));
    }
}
