//! Blocking client for the Indian Railways information API.
//!
//! # Overview
//! Maps method calls onto the service's path-segment URLs
//! (`fare/12555/GKP/NDLS/18/PT/24-02-2015/apikey/KEY`), performs a GET and
//! classifies the JSON body by its `response_code` field.
//!
//! # Design
//! - `RailwayClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `Transport` executes the GET. `UreqTransport` is the default; tests
//!   substitute their own to observe or fake the round trip.
//! - `Railways` ties the two together with one method per operation.
//! - Required parameters are plain `String` fields on per-operation query
//!   structs; blank values are rejected before any request is sent.

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use blocking::Railways;
pub use client::RailwayClient;
pub use config::{ClientConfig, PathLayout, DEFAULT_BASE_URL};
pub use error::{ApiError, RailwayError};
pub use http::{HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    ApiResponse, ArrivalsQuery, FareQuery, NameToCodeQuery, Operation, Query, StationSuggestQuery,
    TrainSuggestQuery,
};
