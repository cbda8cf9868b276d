use std::collections::HashMap;
use std::fmt;

use anyhow::{anyhow, Error as AnyhowError, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpClientResponse {
    body: Option<Bytes>,
    status_code: u16,
    status_text: String,
    // keys are lowercase
    headers: HashMap<String, String>,
}

impl HttpClientResponse {
    pub fn new(
        status_code: u16,
        status_text: String,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(key, value)| (key.to_ascii_lowercase(), value))
            .collect();
        Self {
            body,
            status_code,
            status_text,
            headers,
        }
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .map_or(false, |value| value.starts_with("application/json"))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if let Some(body) = &self.body {
            serde_json::from_slice(body).map_err(|e| anyhow!(e))
        } else {
            Err(anyhow!("No body"))
        }
    }
}

#[derive(Debug, Clone)]
pub enum HttpClientError {
    ConnectionError(String),
    Timeout,
    #[cfg(target_arch = "wasm32")]
    Js(String),
    Other(String),
}

impl fmt::Display for HttpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpClientError::ConnectionError(e) => {
                write!(f, "ConnectionError: {}", e)
            }
            HttpClientError::Timeout => write!(f, "Timeout"),
            #[cfg(target_arch = "wasm32")]
            HttpClientError::Js(e) => write!(f, "JsError: {}", e),
            HttpClientError::Other(e) => write!(f, "Other: {}", e),
        }
    }
}

impl std::error::Error for HttpClientError {}

impl From<AnyhowError> for HttpClientError {
    fn from(err: AnyhowError) -> Self {
        HttpClientError::Other(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HttpClientError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        HttpClientError::Js(
            err.as_string()
                .unwrap_or_else(|| format!("{:?}", err)),
        )
    }
}

pub type HttpClientResult = Result<HttpClientResponse, HttpClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>) -> HttpClientResponse {
        let mut headers = HashMap::new();
        if let Some(content_type) = content_type {
            headers.insert("Content-Type".to_string(), content_type.to_string());
        }
        HttpClientResponse::new(status, String::new(), headers, None)
    }

    #[test]
    fn test_is_success() {
        assert!(response(200, None).is_success());
        assert!(response(204, None).is_success());
        assert!(!response(199, None).is_success());
        assert!(!response(301, None).is_success());
        assert!(!response(422, None).is_success());
    }

    #[test]
    fn test_is_json() {
        assert!(response(400, Some("application/json")).is_json());
        assert!(response(400, Some("application/json; charset=utf-8")).is_json());
        assert!(!response(400, Some("text/html")).is_json());
        assert!(!response(400, None).is_json());
        assert_eq!(
            response(400, Some("text/plain")).header("CONTENT-TYPE"),
            Some("text/plain")
        );
    }

    #[test]
    fn test_json_without_body() {
        let result: Result<serde_json::Value> =
            response(400, Some("application/json")).json();
        assert!(result.is_err());
    }
}
