//! Stateless request builder and response parser for the railway API.
//!
//! # Design
//! `RailwayClient` holds only immutable configuration and carries no state
//! between calls. `build_request` turns a typed query into an `HttpRequest`
//! and `parse_response` turns an `HttpResponse` into an `ApiResponse`. The
//! GET in between belongs to a `Transport` or to the caller, keeping this
//! half deterministic and free of I/O.
//!
//! The service takes its parameters as URL path segments, not as a query
//! string. Each value is form-urlencoded and appended as its own segment,
//! with the API key last: `fare/12555/GKP/NDLS/18/PT/24-02-2015/apikey/KEY`.

use serde_json::Value;
use url::form_urlencoded::byte_serialize;

use crate::config::{ClientConfig, PathLayout};
use crate::error::{ApiError, RailwayError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ApiResponse, Operation, Query};

/// Synchronous, stateless client for the railway API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct RailwayClient {
    api_key: String,
    base_url: String,
    layout: PathLayout,
}

impl RailwayClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            layout: config.layout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn layout(&self) -> PathLayout {
        self.layout
    }

    /// Validate `query` and build the GET request for it.
    ///
    /// Fails with `MissingParameter` on the first blank value, in path order.
    pub fn build_request<Q: Query>(&self, query: &Q) -> Result<HttpRequest, RailwayError> {
        self.build_operation(Q::OPERATION, &query.params())
    }

    /// Build a request from raw `(name, value)` pairs.
    ///
    /// Every name in `Operation::parameters` must be present with a
    /// non-blank value, and no other name is accepted. Segments are emitted
    /// in the operation's path order whatever order `params` comes in.
    pub fn build_operation(
        &self,
        operation: Operation,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest, RailwayError> {
        if !operation.is_supported() {
            return Err(RailwayError::NotImplemented { operation });
        }
        let required = operation.parameters();
        if let Some(&(name, _)) = params
            .iter()
            .find(|(name, _)| !required.iter().any(|r| r == name))
        {
            return Err(RailwayError::UnknownParameter {
                operation,
                parameter: name.to_string(),
            });
        }

        let mut ordered = Vec::with_capacity(required.len());
        for &parameter in required {
            match params.iter().find(|(name, _)| *name == parameter) {
                Some(&(_, value)) if !value.trim().is_empty() => ordered.push((parameter, value)),
                _ => {
                    return Err(RailwayError::MissingParameter {
                        operation,
                        parameter,
                    })
                }
            }
        }

        let mut url = format!("{}/{}", self.base_url, operation.path());
        for (name, value) in ordered {
            if self.layout == PathLayout::Labelled {
                push_segment(&mut url, name);
            }
            push_segment(&mut url, value);
        }
        push_segment(&mut url, "apikey");
        push_segment(&mut url, &self.api_key);

        Ok(HttpRequest {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        })
    }

    /// Decode the body and classify it by its `response_code` field.
    ///
    /// The HTTP status is ignored: the service reports failures in the body.
    pub fn parse_response(&self, response: HttpResponse) -> Result<ApiResponse, RailwayError> {
        let value: Value = serde_json::from_str(&response.body).map_err(|e| {
            ApiError::Deserialization(format!("{e} (HTTP {})", response.status))
        })?;
        let Value::Object(object) = value else {
            return Err(ApiError::Deserialization("expected a JSON object".to_string()).into());
        };
        Ok(check_response_code(ApiResponse::new(object))?)
    }
}

/// Append `value` to `url` as one form-urlencoded path segment.
///
/// `*` is escaped as well, leaving only alphanumerics and `-._` as is.
fn push_segment(url: &mut String, value: &str) {
    url.push('/');
    for chunk in byte_serialize(value.as_bytes()) {
        if chunk.contains('*') {
            url.push_str(&chunk.replace('*', "%2A"));
        } else {
            url.push_str(chunk);
        }
    }
}

/// Map `response_code` to success or the matching `ApiError` variant.
///
/// Integral numbers (`200` or `200.0`) are compared by value. Any other
/// value is an unexpected code; only a missing field is a decoding error.
fn check_response_code(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    let raw = response
        .get("response_code")
        .cloned()
        .ok_or_else(|| ApiError::Deserialization("missing `response_code`".to_string()))?;
    match response.response_code() {
        Some(200) => Ok(response),
        Some(401) => Err(ApiError::Unauthorized),
        Some(403) => Err(ApiError::QuotaExhausted),
        _ => Err(ApiError::Unexpected { code: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ArrivalsQuery, FareQuery, NameToCodeQuery, StationSuggestQuery, TrainSuggestQuery,
    };

    fn client() -> RailwayClient {
        RailwayClient::from_config(
            ClientConfig::new("ABC123").with_base_url("http://localhost:3000"),
        )
    }

    fn fare() -> FareQuery {
        FareQuery {
            train: "12555".to_string(),
            source: "GKP".to_string(),
            dest: "NDLS".to_string(),
            age: "18".to_string(),
            quota: "PT".to_string(),
            doj: "24-02-2015".to_string(),
        }
    }

    fn response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_fare_produces_positional_path() {
        let req = RailwayClient::new("ABC123").build_request(&fare()).unwrap();
        assert_eq!(
            req.url,
            "http://api.railwayapi.com/fare/12555/GKP/NDLS/18/PT/24-02-2015/apikey/ABC123"
        );
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_arrivals_produces_correct_request() {
        let query = ArrivalsQuery {
            station: "NDLS".to_string(),
            hours: "2".to_string(),
        };
        let req = client().build_request(&query).unwrap();
        assert_eq!(req.url, "http://localhost:3000/arrivals/NDLS/2/apikey/ABC123");
    }

    #[test]
    fn build_single_parameter_operations() {
        let c = client();
        let req = c
            .build_request(&StationSuggestQuery {
                name: "mum".to_string(),
            })
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/suggest_station/mum/apikey/ABC123");

        let req = c
            .build_request(&TrainSuggestQuery {
                trains: "123".to_string(),
            })
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/suggest_train/123/apikey/ABC123");

        let req = c
            .build_request(&NameToCodeQuery {
                station: "luckn".to_string(),
            })
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/name_to_code/luckn/apikey/ABC123");
    }

    #[test]
    fn labelled_layout_interleaves_names() {
        let c = RailwayClient::from_config(
            ClientConfig::new("ABC123")
                .with_base_url("http://localhost:3000")
                .with_layout(PathLayout::Labelled),
        );
        assert_eq!(c.layout(), PathLayout::Labelled);
        let req = c.build_request(&fare()).unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/fare/train/12555/source/GKP/dest/NDLS/age/18/quota/PT/doj/24-02-2015/apikey/ABC123"
        );
    }

    #[test]
    fn values_are_form_urlencoded() {
        let req = client()
            .build_request(&NameToCodeQuery {
                station: "new delhi/jn&co=1".to_string(),
            })
            .unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/name_to_code/new+delhi%2Fjn%26co%3D1/apikey/ABC123"
        );
    }

    #[test]
    fn api_key_is_encoded() {
        let c = RailwayClient::from_config(
            ClientConfig::new("a/b c").with_base_url("http://localhost:3000"),
        );
        let req = c
            .build_request(&StationSuggestQuery {
                name: "mum".to_string(),
            })
            .unwrap();
        assert!(req.url.ends_with("/apikey/a%2Fb+c"));
    }

    #[test]
    fn blank_parameter_is_missing() {
        let mut query = fare();
        query.age = String::new();
        let err = client().build_request(&query).unwrap_err();
        assert!(matches!(
            err,
            RailwayError::MissingParameter {
                operation: Operation::Fare,
                parameter: "age"
            }
        ));
    }

    #[test]
    fn whitespace_parameter_is_missing() {
        let query = ArrivalsQuery {
            station: "NDLS".to_string(),
            hours: "  ".to_string(),
        };
        let err = client().build_request(&query).unwrap_err();
        assert!(matches!(
            err,
            RailwayError::MissingParameter {
                parameter: "hours",
                ..
            }
        ));
    }

    #[test]
    fn first_blank_parameter_is_reported() {
        let mut query = fare();
        query.source = String::new();
        query.doj = String::new();
        let err = client().build_request(&query).unwrap_err();
        assert!(matches!(
            err,
            RailwayError::MissingParameter {
                parameter: "source",
                ..
            }
        ));
    }

    #[test]
    fn incomplete_parameter_list_is_rejected() {
        let err = client()
            .build_operation(Operation::Fare, &[("train", "12555")])
            .unwrap_err();
        assert!(matches!(
            err,
            RailwayError::MissingParameter {
                operation: Operation::Fare,
                parameter: "source"
            }
        ));

        let err = client()
            .build_operation(Operation::Arrivals, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            RailwayError::MissingParameter {
                parameter: "station",
                ..
            }
        ));
    }

    #[test]
    fn unknown_parameter_name_is_rejected() {
        let err = client()
            .build_operation(
                Operation::Arrivals,
                &[("station", "NDLS"), ("hours", "2"), ("minutes", "30")],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RailwayError::UnknownParameter { ref parameter, .. } if parameter == "minutes"
        ));
    }

    #[test]
    fn raw_parameters_are_emitted_in_path_order() {
        let req = client()
            .build_operation(Operation::Arrivals, &[("hours", "2"), ("station", "NDLS")])
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/arrivals/NDLS/2/apikey/ABC123");
    }

    #[test]
    fn asterisk_is_percent_encoded() {
        let req = client()
            .build_request(&TrainSuggestQuery::new("12*5 exp"))
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/suggest_train/12%2A5+exp/apikey/ABC123");
    }

    #[test]
    fn unsupported_operation_is_not_built() {
        let err = client()
            .build_operation(Operation::PnrStatus, &[("pnr", "1234567890")])
            .unwrap_err();
        assert!(matches!(
            err,
            RailwayError::NotImplemented {
                operation: Operation::PnrStatus
            }
        ));
    }

    #[test]
    fn trailing_slashes_are_normalized() {
        let c = RailwayClient::from_config(
            ClientConfig::new("k").with_base_url("http://localhost:3000//"),
        );
        assert_eq!(c.base_url(), "http://localhost:3000");
        let req = c
            .build_request(&TrainSuggestQuery {
                trains: "1".to_string(),
            })
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/suggest_train/1/apikey/k");
    }

    #[test]
    fn parse_success_returns_payload_unchanged() {
        let body = r#"{"response_code":200,"station":["MUMBAI CENTRAL","MUMBAI CST"],"total":2}"#;
        let resp = client().parse_response(response(body)).unwrap();
        let expected: Value = serde_json::from_str(body).unwrap();
        assert_eq!(resp.into_value(), expected);
    }

    #[test]
    fn parse_401_is_unauthorized() {
        let err = client()
            .parse_response(response(r#"{"response_code":401}"#))
            .unwrap_err();
        assert!(matches!(err, RailwayError::Api(ApiError::Unauthorized)));
    }

    #[test]
    fn parse_403_is_quota_exhausted() {
        let err = client()
            .parse_response(response(r#"{"response_code":403}"#))
            .unwrap_err();
        assert!(matches!(err, RailwayError::Api(ApiError::QuotaExhausted)));
    }

    #[test]
    fn parse_other_code_is_unexpected() {
        let err = client()
            .parse_response(response(r#"{"response_code":500}"#))
            .unwrap_err();
        assert!(matches!(
            err,
            RailwayError::Api(ApiError::Unexpected { ref code }) if *code == 500
        ));
    }

    #[test]
    fn integral_float_codes_are_classified_by_value() {
        let c = client();
        assert!(c.parse_response(response(r#"{"response_code":200.0}"#)).is_ok());
        let err = c
            .parse_response(response(r#"{"response_code":401.0}"#))
            .unwrap_err();
        assert!(matches!(err, RailwayError::Api(ApiError::Unauthorized)));
    }

    #[test]
    fn non_integer_code_is_unexpected() {
        for body in [
            r#"{"response_code":"500"}"#,
            r#"{"response_code":"200"}"#,
            r#"{"response_code":200.5}"#,
            r#"{"response_code":null}"#,
        ] {
            let err = client().parse_response(response(body)).unwrap_err();
            assert!(
                matches!(err, RailwayError::Api(ApiError::Unexpected { .. })),
                "{body}: got {err:?}"
            );
            assert!(err.to_string().contains("something went wrong"), "{body}");
        }
    }

    #[test]
    fn http_status_does_not_override_response_code() {
        let resp = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: r#"{"response_code":200}"#.to_string(),
        };
        assert!(client().parse_response(resp).is_ok());
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_response(response("not json")).unwrap_err();
        assert!(matches!(
            err,
            RailwayError::Api(ApiError::Deserialization(_))
        ));
    }

    #[test]
    fn parse_non_object() {
        let err = client().parse_response(response("[200]")).unwrap_err();
        assert!(matches!(
            err,
            RailwayError::Api(ApiError::Deserialization(_))
        ));
    }

    #[test]
    fn parse_missing_response_code() {
        let err = client()
            .parse_response(response(r#"{"station":[]}"#))
            .unwrap_err();
        assert!(matches!(
            err,
            RailwayError::Api(ApiError::Deserialization(_))
        ));
    }
}
