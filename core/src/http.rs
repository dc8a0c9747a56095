//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data.
//! `RailwayClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network; a `Transport` (or the caller) runs
//! the actual GET in between.
//!
//! The railway service only ever answers GET requests, so no method field
//! is carried.

/// A GET request described as plain data.
///
/// Built by `RailwayClient::build_request`. The `url` is complete: base URL,
/// operation path and every path segment including the API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// The URL with the API key segment masked, for logs.
    pub fn redacted_url(&self) -> String {
        match self.url.rfind("/apikey/") {
            Some(idx) => format!("{}/apikey/***", &self.url[..idx]),
            None => self.url.clone(),
        }
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` after executing an `HttpRequest`, then passed
/// to `RailwayClient::parse_response`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
