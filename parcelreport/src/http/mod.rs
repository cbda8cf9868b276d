mod response;
mod transport;
pub use response::{HttpClientError, HttpClientResponse, HttpClientResult};
pub use transport::{Transport, JSON_CONTENT_TYPE};

#[cfg(all(feature = "http_client", not(target_arch = "wasm32")))]
mod client;
#[cfg(target_arch = "wasm32")]
#[path = "client_wasm32.rs"]
mod client;
#[cfg(any(feature = "http_client", target_arch = "wasm32"))]
pub use client::HttpClient;
