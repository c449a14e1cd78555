//! Outbound HTTP client shared by the origin fetcher and the API passthrough.

use axum::body::Body;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

/// Pooled HTTP/1.1 client.
pub type HttpClient = Client<HttpConnector, Body>;

/// Build the shared client. Cloning the result shares the connection pool.
pub fn build_client() -> HttpClient {
    Client::builder(TokioExecutor::new()).build(HttpConnector::new())
}
