use async_trait::async_trait;
use bytes::Bytes;

use super::response::HttpClientResult;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Sends a JSON document to an endpoint and hands back whatever response
/// came back, successful or not.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: Bytes) -> HttpClientResult;
}

#[cfg(any(feature = "http_client", target_arch = "wasm32"))]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for super::HttpClient {
    async fn post_json(&self, url: &str, body: Bytes) -> HttpClientResult {
        let mut headers = std::collections::HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            JSON_CONTENT_TYPE.to_string(),
        );
        self.post(url, Some(&headers), Some(&body)).await
    }
}
