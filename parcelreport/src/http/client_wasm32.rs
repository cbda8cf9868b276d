use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use js_sys::{ArrayBuffer, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use super::response::{HttpClientError, HttpClientResponse, HttpClientResult};

const FORWARDED_HEADERS: [&str; 2] = ["content-type", "content-length"];

/// Browser `fetch` backed client. Requests run on the page's event loop and
/// cannot be timed out from here.
#[derive(Clone, Default)]
pub struct HttpClient;

impl HttpClient {
    pub fn new() -> Self {
        HttpClient
    }

    pub fn with_timeout(self, _timeout: Duration) -> Self {
        self
    }

    async fn request(
        &self,
        method: &str,
        url: &str,
        headers: Option<&HashMap<String, String>>,
        body: Option<&Bytes>,
    ) -> HttpClientResult {
        log::debug!("{} {}", method, url);
        let window = web_sys::window().ok_or_else(|| {
            HttpClientError::Other("No window available".to_string())
        })?;

        let mut request_init = RequestInit::new();
        request_init.method(method);
        request_init.mode(RequestMode::Cors);

        let headers_map = Headers::new()?;
        if let Some(headers) = headers {
            for (key, value) in headers {
                headers_map.set(key, value)?;
            }
        }
        request_init.headers(&headers_map);

        if let Some(body) = body {
            let body_array = Uint8Array::from(&body[..]);
            request_init.body(Some(&JsValue::from(body_array)));
        }

        let request = Request::new_with_str_and_init(url, &request_init)?;
        let response_js = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| {
                log::debug!("fetch {} failed: {:?}", url, e);
                HttpClientError::ConnectionError(url.to_string())
            })?;
        let response: Response = response_js.dyn_into()?;

        let mut response_headers = HashMap::new();
        for name in FORWARDED_HEADERS {
            if let Some(value) = response.headers().get(name)? {
                response_headers.insert(name.to_string(), value);
            }
        }

        let body_js = JsFuture::from(response.array_buffer()?).await?;
        let body: ArrayBuffer = body_js.dyn_into()?;
        let body_bytes = Uint8Array::new(&body).to_vec();

        Ok(HttpClientResponse::new(
            response.status(),
            response.status_text(),
            response_headers,
            Some(Bytes::from(body_bytes)),
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
