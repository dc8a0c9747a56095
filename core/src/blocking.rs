//! Blocking client running the whole call chain.
//!
//! validate → build path → GET → decode → classify by `response_code`.
//! Each method performs at most one network call; failures propagate
//! without retry.

use tracing::{debug, warn};

use crate::client::RailwayClient;
use crate::config::ClientConfig;
use crate::error::RailwayError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    ApiResponse, ArrivalsQuery, FareQuery, NameToCodeQuery, Operation, Query, StationSuggestQuery,
    TrainSuggestQuery,
};

/// Railway API client that performs the HTTP round trip itself.
///
/// Holds only immutable configuration, so one instance can serve
/// independent requests from several threads when `T` allows it.
#[derive(Debug, Clone)]
pub struct Railways<T = UreqTransport> {
    client: RailwayClient,
    transport: T,
}

impl Railways<UreqTransport> {
    /// Client for the public service, authenticated with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::from_config(&config);
        Self {
            client: RailwayClient::from_config(config),
            transport,
        }
    }
}

impl<T: Transport> Railways<T> {
    pub fn with_transport(client: RailwayClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &RailwayClient {
        &self.client
    }

    /// Run any supported query.
    pub fn query<Q: Query>(&self, query: &Q) -> Result<ApiResponse, RailwayError> {
        let operation = Q::OPERATION;
        let request = self.client.build_request(query)?;
        debug!(%operation, url = %request.redacted_url(), "Sending request");

        let response = self.transport.execute(&request).inspect_err(|e| {
            warn!(%operation, error = %e, "Transport failed");
        })?;

        match self.client.parse_response(response) {
            Ok(resp) => {
                debug!(%operation, "Request succeeded");
                Ok(resp)
            }
            Err(e) => {
                warn!(%operation, error = %e, "Request rejected");
                Err(e)
            }
        }
    }

    /// Fare of a journey between two stations.
    pub fn fare(&self, query: &FareQuery) -> Result<ApiResponse, RailwayError> {
        self.query(query)
    }

    /// Trains arriving at a station within the next `hours`, with live status.
    pub fn arrivals(&self, query: &ArrivalsQuery) -> Result<ApiResponse, RailwayError> {
        self.query(query)
    }

    /// Full station names for a partial name.
    pub fn suggest_station(&self, query: &StationSuggestQuery) -> Result<ApiResponse, RailwayError> {
        self.query(query)
    }

    /// Train names or numbers for a partial one.
    pub fn suggest_train(&self, query: &TrainSuggestQuery) -> Result<ApiResponse, RailwayError> {
        self.query(query)
    }

    /// Station code for a full station name.
    pub fn name_to_code(&self, query: &NameToCodeQuery) -> Result<ApiResponse, RailwayError> {
        self.query(query)
    }

    pub fn live_status(&self) -> Result<ApiResponse, RailwayError> {
        unsupported(Operation::LiveStatus)
    }

    pub fn pnr_status(&self) -> Result<ApiResponse, RailwayError> {
        unsupported(Operation::PnrStatus)
    }

    pub fn seat_availability(&self) -> Result<ApiResponse, RailwayError> {
        unsupported(Operation::SeatAvailability)
    }

    pub fn route(&self) -> Result<ApiResponse, RailwayError> {
        unsupported(Operation::Route)
    }

    pub fn trains_between_stations(&self) -> Result<ApiResponse, RailwayError> {
        unsupported(Operation::TrainsBetweenStations)
    }

    pub fn train_name_number(&self) -> Result<ApiResponse, RailwayError> {
        unsupported(Operation::TrainNameNumber)
    }

    pub fn code_to_name(&self) -> Result<ApiResponse, RailwayError> {
        unsupported(Operation::CodeToName)
    }
}

fn unsupported(operation: Operation) -> Result<ApiResponse, RailwayError> {
    Err(RailwayError::NotImplemented { operation })
}
