//! Client for the external half-marathon estimation service.
//!
//! The service is a collaborator with a small contract: `POST /submit` with
//! `{"value": "<trial time>"}`, answered by `{"received": .., "row": {..} | null}`.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::time::Duration;

use crate::error::EstimatorError;
use crate::fields::EstimationRow;

/// Upper bound on the response body we are willing to buffer
const MAX_RESPONSE_BYTES: u64 = 256 * 1024;

/// Request body sent to the estimator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitPayload<'a> {
    pub value: &'a str,
}

/// Decoded estimator reply
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EstimateResponse {
    #[serde(default)]
    pub received: Option<String>,
    /// Absent and `null` both mean "no matching row"
    #[serde(default)]
    pub row: Option<EstimationRow>,
}

/// Anything that can turn a trial time into an estimation row
pub trait PaceEstimator {
    fn estimate(&self, value: &str) -> Result<EstimateResponse, EstimatorError>;
}

impl<T: PaceEstimator + ?Sized> PaceEstimator for &T {
    fn estimate(&self, value: &str) -> Result<EstimateResponse, EstimatorError> {
        (**self).estimate(value)
    }
}

/// Blocking HTTP implementation backed by a `ureq` agent
#[derive(Debug, Clone)]
pub struct HttpEstimator {
    agent: ureq::Agent,
    submit_url: String,
}

impl HttpEstimator {
    /// Build a client for `base_url`. No timeout is applied unless given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            agent: builder.build(),
            submit_url: format!("{}/submit", base_url.trim_end_matches('/')),
        }
    }

    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }
}

impl PaceEstimator for HttpEstimator {
    fn estimate(&self, value: &str) -> Result<EstimateResponse, EstimatorError> {
        let request = self
            .agent
            .post(&self.submit_url)
            .set("Accept", "application/json");

        tracing::debug!(url = %self.submit_url, value, "Sending trial result");

        let response = match request.send_json(SubmitPayload { value }) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response).unwrap_or_else(|err| err.to_string());
                return Err(EstimatorError::Status { code, body });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(EstimatorError::Transport(err.to_string()));
            }
        };

        let body = read_body_limited(response).map_err(|err| EstimatorError::Decode(err.to_string()))?;
        let decoded: EstimateResponse =
            serde_json::from_str(&body).map_err(|err| EstimatorError::Decode(err.to_string()))?;

        tracing::info!(
            received = ?decoded.received,
            has_row = decoded.row.is_some(),
            "Estimator responded"
        );
        Ok(decoded)
    }
}

fn read_body_limited(response: ureq::Response) -> std::io::Result<String> {
    let mut body = String::new();
    response
        .into_reader()
        .take(MAX_RESPONSE_BYTES + 1)
        .read_to_string(&mut body)?;
    if body.len() as u64 > MAX_RESPONSE_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Response exceeded {MAX_RESPONSE_BYTES} bytes"),
        ));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_url_tolerates_trailing_slash() {
        assert_eq!(
            HttpEstimator::new("http://localhost:8000/", None).submit_url(),
            "http://localhost:8000/submit"
        );
        assert_eq!(
            HttpEstimator::new("http://example.test/api", None).submit_url(),
            "http://example.test/api/submit"
        );
    }

    #[test]
    fn test_payload_shape() {
        let json = serde_json::to_value(SubmitPayload { value: "0:21:30" }).unwrap();
        assert_eq!(json, serde_json::json!({"value": "0:21:30"}));
    }

    #[test]
    fn test_response_decoding() {
        let decoded: EstimateResponse =
            serde_json::from_str(r#"{"received": "21:30", "row": null}"#).unwrap();
        assert_eq!(decoded.received.as_deref(), Some("21:30"));
        assert!(decoded.row.is_none());

        let decoded: EstimateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(decoded.row.is_none());

        let decoded: EstimateResponse =
            serde_json::from_str(r#"{"row": {"race_half": "1:45:00"}, "extra": 1}"#).unwrap();
        assert_eq!(decoded.row.unwrap()["race_half"], "1:45:00");
    }
}
