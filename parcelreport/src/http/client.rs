use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;
use bytes::{Bytes, BytesMut};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Request, Uri};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::time::timeout;

use super::response::{HttpClientError, HttpClientResponse, HttpClientResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

impl From<hyper::http::Error> for HttpClientError {
    fn from(err: hyper::http::Error) -> Self {
        HttpClientError::Other(err.to_string())
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client<
        HttpsConnector<HttpConnector>,
        BoxBody<bytes::Bytes, Infallible>,
    >,
    timeout: Duration,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    pub fn new() -> Self {
        let https = HttpsConnector::new();

        let client: Client<
            HttpsConnector<HttpConnector>,
            BoxBody<Bytes, Infallible>,
        > = Client::builder(TokioExecutor::new())
            .build::<_, BoxBody<Bytes, Infallible>>(https);

        HttpClient {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(
        &self,
        method: &str,
        url: &str,
        headers: Option<&HashMap<String, String>>,
        body: Option<&Bytes>,
    ) -> HttpClientResult {
        log::debug!("{} {}", method, url);
        let uri = Uri::from_str(url)
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        let mut req_builder = Request::builder().method(method).uri(uri);

        if let Some(headers_map) = headers {
            for (key, value) in headers_map.iter() {
                let header_name = HeaderName::from_str(key)
                    .map_err(|e| HttpClientError::Other(e.to_string()))?;
                let header_value = HeaderValue::from_str(value)
                    .map_err(|e| HttpClientError::Other(e.to_string()))?;
                req_builder = req_builder.header(header_name, header_value);
            }
        }
        let request = req_builder.body(create_request_body(body))?;

        // the deadline covers the response body as well as the headers
        match timeout(self.timeout, self.exchange(url, request)).await {
            Ok(result) => result,
            Err(_) => {
                log::debug!("Request to {} timed out", url);
                Err(HttpClientError::Timeout)
            }
        }
    }

    async fn exchange(
        &self,
        url: &str,
        request: Request<BoxBody<Bytes, Infallible>>,
    ) -> HttpClientResult {
        let mut response =
            self.client.request(request).await.map_err(|e| {
                log::debug!("Connection to {} failed: {}", url, e);
                HttpClientError::ConnectionError(url.to_string())
            })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let headers = response.headers().iter().fold(
            HashMap::new(),
            |mut acc, (k, v)| {
                acc.insert(
                    k.to_string(),
                    v.to_str().unwrap_or_default().to_string(),
                );
                acc
            },
        );

        // error bodies are read as well, the caller decides how to use them
        let mut body_bytes = BytesMut::new();
        while let Some(next) = response.frame().await {
            let frame = next.map_err(|e| anyhow!(e))?;
            if let Some(chunk) = frame.data_ref() {
                body_bytes.extend_from_slice(chunk);
            }
        }

        Ok(HttpClientResponse::new(
            status.as_u16(),
            status_text,
            headers,
            Some(body_bytes.freeze()),
        ))
    }

    pub async fn post(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
        body: Option<&Bytes>,
    ) -> HttpClientResult {
        self.request("POST", url, headers, body).await
    }
}

fn create_request_body(
    body_content: Option<&Bytes>,
) -> BoxBody<Bytes, Infallible> {
    match body_content {
        Some(content) => {
            let full_body: Full<Bytes> = Full::new(content.clone());
            BoxBody::new(full_body)
        }
        None => {
            let empty_body: Empty<Bytes> = Empty::new();
            BoxBody::new(empty_body)
        }
    }
}
