//! Operations, query parameters and the decoded response.
//!
//! # Design
//! Every supported operation has a query struct whose fields are all
//! required `String`s, declared in the order the service expects them in the
//! URL path. `Query::params` exposes that order to the request builder.
//! Blank values are still rejected at build time, since an empty string
//! would collapse a path segment.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every operation in the railway service contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fare,
    Arrivals,
    SuggestStation,
    SuggestTrain,
    NameToCode,
    LiveStatus,
    PnrStatus,
    SeatAvailability,
    Route,
    TrainsBetweenStations,
    TrainNameNumber,
    CodeToName,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::Fare,
        Operation::Arrivals,
        Operation::SuggestStation,
        Operation::SuggestTrain,
        Operation::NameToCode,
        Operation::LiveStatus,
        Operation::PnrStatus,
        Operation::SeatAvailability,
        Operation::Route,
        Operation::TrainsBetweenStations,
        Operation::TrainNameNumber,
        Operation::CodeToName,
    ];

    /// URL path segment naming the operation.
    pub const fn path(self) -> &'static str {
        match self {
            Operation::Fare => "fare",
            Operation::Arrivals => "arrivals",
            Operation::SuggestStation => "suggest_station",
            Operation::SuggestTrain => "suggest_train",
            Operation::NameToCode => "name_to_code",
            Operation::LiveStatus => "live",
            Operation::PnrStatus => "pnr_status",
            Operation::SeatAvailability => "check_seat",
            Operation::Route => "route",
            Operation::TrainsBetweenStations => "between",
            Operation::TrainNameNumber => "name_number",
            Operation::CodeToName => "code_to_name",
        }
    }

    /// Whether this client can issue the operation.
    pub const fn is_supported(self) -> bool {
        matches!(
            self,
            Operation::Fare
                | Operation::Arrivals
                | Operation::SuggestStation
                | Operation::SuggestTrain
                | Operation::NameToCode
        )
    }

    /// Required parameter names in URL path order. Empty for operations
    /// the client does not support.
    pub const fn parameters(self) -> &'static [&'static str] {
        match self {
            Operation::Fare => &["train", "source", "dest", "age", "quota", "doj"],
            Operation::Arrivals => &["station", "hours"],
            Operation::SuggestStation => &["name"],
            Operation::SuggestTrain => &["trains"],
            Operation::NameToCode => &["station"],
            _ => &[],
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.path() == path)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A typed request for one supported operation.
pub trait Query {
    const OPERATION: Operation;

    /// `(name, value)` pairs in URL path order.
    fn params(&self) -> Vec<(&'static str, &str)>;
}

/// Fare of a journey between two stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareQuery {
    /// Train number, e.g. `12555`.
    pub train: String,
    /// Source station code.
    pub source: String,
    /// Destination station code.
    pub dest: String,
    /// Passenger age as an integer string.
    pub age: String,
    /// Quota code, e.g. `GN` or `PT`.
    pub quota: String,
    /// Date of journey, `dd-mm-yyyy`.
    pub doj: String,
}

impl Query for FareQuery {
    const OPERATION: Operation = Operation::Fare;

    fn params(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("train", self.train.as_str()),
            ("source", self.source.as_str()),
            ("dest", self.dest.as_str()),
            ("age", self.age.as_str()),
            ("quota", self.quota.as_str()),
            ("doj", self.doj.as_str()),
        ]
    }
}

/// Trains arriving at a station within a window, with live status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalsQuery {
    pub station: String,
    /// Lookahead window in whole hours.
    pub hours: String,
}

impl Query for ArrivalsQuery {
    const OPERATION: Operation = Operation::Arrivals;

    fn params(&self) -> Vec<(&'static str, &str)> {
        vec![("station", self.station.as_str()), ("hours", self.hours.as_str())]
    }
}

/// Full station names matching a partial name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSuggestQuery {
    pub name: String,
}

impl StationSuggestQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }
}

impl Query for StationSuggestQuery {
    const OPERATION: Operation = Operation::SuggestStation;

    fn params(&self) -> Vec<(&'static str, &str)> {
        vec![("name", self.name.as_str())]
    }
}

/// Train names or numbers matching a partial one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSuggestQuery {
    pub trains: String,
}

impl TrainSuggestQuery {
    pub fn new(trains: impl Into<String>) -> Self {
        Self {
            trains: trains.into(),
        }
    }
}

impl Query for TrainSuggestQuery {
    const OPERATION: Operation = Operation::SuggestTrain;

    fn params(&self) -> Vec<(&'static str, &str)> {
        vec![("trains", self.trains.as_str())]
    }
}

/// Station codes for a station name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameToCodeQuery {
    pub station: String,
}

impl NameToCodeQuery {
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
        }
    }
}

impl Query for NameToCodeQuery {
    const OPERATION: Operation = Operation::NameToCode;

    fn params(&self) -> Vec<(&'static str, &str)> {
        vec![("station", self.station.as_str())]
    }
}

/// A decoded JSON object returned by the service with `response_code` 200.
///
/// The object is kept exactly as received; payload shapes differ per
/// operation and are not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse(Map<String, Value>);

impl ApiResponse {
    pub fn new(object: Map<String, Value>) -> Self {
        Self(object)
    }

    /// The `response_code` field, if it is a number with an integral value.
    ///
    /// `200.0` reads as 200.
    pub fn response_code(&self) -> Option<i64> {
        let code = self.0.get("response_code")?;
        code.as_i64().or_else(|| {
            code.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
