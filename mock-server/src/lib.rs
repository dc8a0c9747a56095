//! Local stand-in for the railway information service.
//!
//! Speaks the same wire contract: `GET /<operation>/<segments>/apikey/<key>`
//! answered with a JSON body whose `response_code` carries the outcome. The
//! HTTP status is always 200, as with the real service.
//!
//! Both segment layouts are accepted: values only, or alternating
//! `name/value` pairs.

use std::sync::Arc;

use axum::{extract::State, http::Uri, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// Any request carrying this key is answered with `response_code` 403.
pub const QUOTA_EXHAUSTED_KEY: &str = "quota-exhausted";

const STATIONS: &[Station] = &[
    Station { fullname: "MUMBAI CENTRAL", code: "BCT" },
    Station { fullname: "MUMBAI CST", code: "CSTM" },
    Station { fullname: "MUMBAI DADAR", code: "DR" },
    Station { fullname: "NEW DELHI", code: "NDLS" },
    Station { fullname: "LUCKNOW NR", code: "LKO" },
    Station { fullname: "LUCKNOW JN NE", code: "LJN" },
    Station { fullname: "GORAKHPUR JN", code: "GKP" },
];

const TRAINS: &[(&str, &str)] = &[
    ("12555", "GORAKHDHAM EXP"),
    ("12301", "HOWRAH RAJDHANI"),
    ("12311", "KALKA MAIL"),
    ("22436", "VANDE BHARAT EXP"),
];

#[derive(Debug, Clone, Copy, Serialize)]
struct Station {
    fullname: &'static str,
    code: &'static str,
}

#[derive(Clone)]
struct MockState {
    api_key: Arc<str>,
}

/// Router accepting `api_key` as the only valid credential.
pub fn app(api_key: &str) -> Router {
    let state = MockState {
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/{operation}/{*segments}", get(dispatch))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

/// Parameter names per operation, in path order.
fn parameter_names(operation: &str) -> Option<&'static [&'static str]> {
    match operation {
        "fare" => Some(&["train", "source", "dest", "age", "quota", "doj"]),
        "arrivals" => Some(&["station", "hours"]),
        "suggest_station" => Some(&["name"]),
        "suggest_train" => Some(&["trains"]),
        "name_to_code" => Some(&["station"]),
        _ => None,
    }
}

// The raw URI is used instead of `Path` so that `+` decodes to a space
// and an encoded `/` stays inside its segment.
async fn dispatch(State(state): State<MockState>, uri: Uri) -> Json<Value> {
    Json(respond(&state.api_key, uri.path()))
}

fn respond(api_key: &str, path: &str) -> Value {
    let segments: Vec<String> = path
        .trim_matches('/')
        .split('/')
        .map(decode_segment)
        .collect();
    let Some((operation, rest)) = segments.split_first() else {
        return response_code(404);
    };
    let Some(names) = parameter_names(operation) else {
        debug!(%operation, "unknown operation");
        return response_code(404);
    };
    let Some((values, key)) = split_params(names, rest) else {
        debug!(%operation, "malformed path");
        return response_code(500);
    };
    if key == QUOTA_EXHAUSTED_KEY {
        return response_code(403);
    }
    if key != api_key {
        return response_code(401);
    }

    debug!(%operation, ?values, "serving");
    payload(operation, &values)
}

/// Decode one form-urlencoded path segment.
fn decode_segment(segment: &str) -> String {
    url::form_urlencoded::parse(segment.as_bytes())
        .map(|(k, v)| {
            if v.is_empty() {
                k.into_owned()
            } else {
                format!("{k}={v}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Split the segments after the operation into values and the API key.
fn split_params<'a>(names: &[&str], rest: &'a [String]) -> Option<(Vec<&'a str>, &'a str)> {
    let [params @ .., label, key] = rest else {
        return None;
    };
    if label != "apikey" {
        return None;
    }

    let values: Vec<&str> = if params.len() == names.len() {
        params.iter().map(String::as_str).collect()
    } else if params.len() == names.len() * 2
        && params
            .chunks(2)
            .zip(names)
            .all(|(pair, name)| pair[0] == *name)
    {
        params.chunks(2).map(|pair| pair[1].as_str()).collect()
    } else {
        return None;
    };

    if values.iter().any(|v| v.trim().is_empty()) {
        return None;
    }
    Some((values, key.as_str()))
}

fn response_code(code: u16) -> Value {
    json!({ "response_code": code })
}

fn payload(operation: &str, values: &[&str]) -> Value {
    match (operation, values) {
        ("fare", [train, source, dest, age, quota, doj]) => json!({
            "response_code": 200,
            "train": { "number": train, "name": train_name(train) },
            "from": { "code": source },
            "to": { "code": dest },
            "quota": { "code": quota },
            "age": age,
            "doj": doj,
            "fare": [
                { "code": "SL", "name": "SLEEPER CLASS", "fare": "475" },
                { "code": "3A", "name": "AC 3 TIER", "fare": "1275" },
            ],
        }),
        ("arrivals", [station, hours]) => json!({
            "response_code": 200,
            "station": station,
            "hours": hours,
            "total": 2,
            "train": [
                { "number": "12555", "name": "GORAKHDHAM EXP", "scharr": "10:35", "actarr": "10:40", "delayarr": "00:05" },
                { "number": "12311", "name": "KALKA MAIL", "scharr": "11:10", "actarr": "11:10", "delayarr": "00:00" },
            ],
        }),
        ("suggest_station", [name]) => {
            let names: Vec<&str> = matching_stations(name).map(|s| s.fullname).collect();
            json!({ "response_code": 200, "total": names.len(), "station": names })
        }
        ("suggest_train", [partial]) => {
            let needle = partial.to_uppercase();
            let trains: Vec<String> = TRAINS
                .iter()
                .filter(|(number, name)| number.starts_with(&needle) || name.contains(&needle))
                .map(|(number, name)| format!("{number} - {name}"))
                .collect();
            json!({ "response_code": 200, "total": trains.len(), "trains": trains })
        }
        ("name_to_code", [station]) => {
            let stations: Vec<Station> = matching_stations(station).collect();
            json!({ "response_code": 200, "total": stations.len(), "stations": stations })
        }
        _ => response_code(500),
    }
}

fn matching_stations(partial: &str) -> impl Iterator<Item = Station> + '_ {
    let needle = partial.to_uppercase();
    STATIONS
        .iter()
        .copied()
        .filter(move |s| s.fullname.contains(&needle))
}

fn train_name(number: &str) -> &'static str {
    TRAINS
        .iter()
        .find(|(n, _)| *n == number)
        .map_or("UNKNOWN", |(_, name)| *name)
}
