//! # API Boundary
//!
//! Entry points for a transport layer (HTTP handler, CLI, message bus).
//! Every [`NucleusError`] is caught here and turned into a structured
//! [`ErrorBody`]; nothing escapes as an unhandled fault and no default
//! result is ever fabricated.
//!
//! ## Example
//!
//! ```rust
//! use nucleus_core::api;
//! use nucleus_core::hub::NucleusHub;
//!
//! let mut hub = NucleusHub::new();
//!
//! let ok = api::dispatch(&mut hub, "evaluate", r#"{ "material_id": "steel" }"#);
//! assert!(ok.contains("\"thickness\":20.0"));
//!
//! let missing = api::dispatch(&mut hub, "evaluate", r#"{ "material_id": "granite" }"#);
//! assert!(missing.contains("NOT_FOUND"));
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::calculations::AdvisoryResult;
use crate::errors::{NucleusError, NucleusResult};
use crate::hub::{EvaluateRequest, MaterialQuery, NucleusHub, SubmitRequest, SubmitResponse};

/// Structured error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error code (e.g. "NOT_FOUND")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Offending input field, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// HTTP-like status
    pub status: u16,
}

impl From<&NucleusError> for ErrorBody {
    fn from(err: &NucleusError) -> Self {
        ErrorBody {
            code: err.error_code().to_string(),
            message: err.to_string(),
            field: err.field().map(str::to_string),
            status: err.status(),
        }
    }
}

/// Either a payload or an error body.
///
/// Serializes as the bare payload on success and as `{ "error": {...} }`
/// on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Ok(T),
    Error { error: ErrorBody },
}

impl<T: Serialize> ApiResponse<T> {
    fn from_result(operation: Operation, result: NucleusResult<T>) -> Self {
        match result {
            Ok(payload) => ApiResponse::Ok(payload),
            Err(err) => {
                warn!("{} rejected: {}", operation, err);
                ApiResponse::Error {
                    error: ErrorBody::from(&err),
                }
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ApiResponse::Ok(_))
    }

    /// Error body, if this is a failure
    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            ApiResponse::Ok(_) => None,
            ApiResponse::Error { error } => Some(error),
        }
    }

    /// Render as compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| serialization_failure(&e))
    }
}

fn serialization_failure(err: &serde_json::Error) -> String {
    let body = ErrorBody::from(&NucleusError::serialization(err.to_string()));
    // ErrorBody holds only strings and an integer.
    serde_json::to_string(&ApiResponse::<()>::Error { error: body }).unwrap_or_default()
}

/// Operations a transport can dispatch by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Evaluate,
    Submit,
    ListMaterials,
    RecentMaterials,
    Feed,
}

impl Operation {
    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> NucleusResult<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "evaluate" | "calculate" | "scan" => Ok(Operation::Evaluate),
            "submit" | "add" | "create" => Ok(Operation::Submit),
            "list_materials" | "list" | "materials" => Ok(Operation::ListMaterials),
            "recent_materials" | "recent" => Ok(Operation::RecentMaterials),
            "feed" => Ok(Operation::Feed),
            _ => Err(NucleusError::not_found("Operation", s)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Evaluate => "evaluate",
            Operation::Submit => "submit",
            Operation::ListMaterials => "list_materials",
            Operation::RecentMaterials => "recent_materials",
            Operation::Feed => "feed",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Body of the recent-materials operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Evaluate operation with errors recovered into the response.
pub fn evaluate(hub: &NucleusHub, request: &EvaluateRequest) -> ApiResponse<AdvisoryResult> {
    ApiResponse::from_result(Operation::Evaluate, hub.evaluate(request))
}

/// Submit operation with errors recovered into the response.
pub fn submit(hub: &mut NucleusHub, request: &SubmitRequest) -> ApiResponse<SubmitResponse> {
    ApiResponse::from_result(Operation::Submit, hub.submit(request))
}

fn parse_body<T: for<'de> Deserialize<'de>>(body: &str) -> NucleusResult<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    Ok(serde_json::from_str(body)?)
}

/// Run an operation named by string on a JSON body; always returns JSON.
pub fn dispatch(hub: &mut NucleusHub, operation: &str, body: &str) -> String {
    let operation = match Operation::from_str_flexible(operation) {
        Ok(op) => op,
        Err(err) => {
            warn!("unknown operation: {}", operation);
            return ApiResponse::<()>::Error {
                error: ErrorBody::from(&err),
            }
            .to_json();
        }
    };

    match operation {
        Operation::Evaluate => {
            let result = parse_body::<EvaluateRequest>(body).and_then(|req| hub.evaluate(&req));
            ApiResponse::from_result(operation, result).to_json()
        }
        Operation::Submit => {
            let result = parse_body::<SubmitRequest>(body).and_then(|req| hub.submit(&req));
            ApiResponse::from_result(operation, result).to_json()
        }
        Operation::ListMaterials => {
            let result = parse_body::<MaterialQuery>(body).map(|query| {
                hub.list_materials(&query)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            });
            ApiResponse::from_result(operation, result).to_json()
        }
        Operation::RecentMaterials => {
            let result = parse_body::<RecentQuery>(body).map(|query| {
                hub.recent_materials(query.limit)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            });
            ApiResponse::from_result(operation, result).to_json()
        }
        Operation::Feed => ApiResponse::Ok(hub.feed().list()).to_json(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn json(raw: &str) -> Value {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_evaluate_ok_shape() {
        let hub = NucleusHub::new();
        let response = evaluate(&hub, &EvaluateRequest::for_material("steel"));
        assert!(response.is_ok());

        let value = json(&response.to_json());
        assert_eq!(value["thickness"], 20.0);
        assert_eq!(value["carbon"], "0%");
        assert_eq!(value["ribs"], false);
        assert_eq!(value["tip"], "Excellent design!");
    }

    #[test]
    fn test_evaluate_not_found_has_no_payload() {
        let hub = NucleusHub::new();
        let response = evaluate(&hub, &EvaluateRequest::for_material("granite"));
        let error = response.error().unwrap();
        assert_eq!(error.code, "NOT_FOUND");
        assert_eq!(error.status, 404);

        let value = json(&response.to_json());
        assert!(value.get("thickness").is_none());
        assert_eq!(value["error"]["message"], "Material not found: granite");
    }

    #[test]
    fn test_submit_ok_and_invalid() {
        let mut hub = NucleusHub::new();
        let ok = dispatch(
            &mut hub,
            "submit",
            r#"{ "name": "Olive Wood", "strength": "55", "contributor": "Lab_X" }"#,
        );
        assert_eq!(json(&ok)["success"], true);

        let bad = dispatch(&mut hub, "submit", r#"{ "name": "Clay", "strength": "lots" }"#);
        let value = json(&bad);
        assert_eq!(value["error"]["code"], "INVALID_INPUT");
        assert_eq!(value["error"]["field"], "strength");
        assert_eq!(value["error"]["status"], 400);

        let missing = dispatch(&mut hub, "submit", r#"{ "strength": 10 }"#);
        assert_eq!(json(&missing)["error"]["code"], "MISSING_FIELD");

        assert_eq!(hub.feed().len(), 1);
    }

    #[test]
    fn test_dispatch_never_emits_null_thickness() {
        let mut hub = NucleusHub::new();
        let dust = json(&dispatch(&mut hub, "submit", r#"{ "name": "Dust", "strength": "5e-324" }"#));
        assert_eq!(dust["error"]["code"], "INVALID_INPUT");
        assert_eq!(dust["error"]["field"], "strength");

        let huge = json(&dispatch(
            &mut hub,
            "evaluate",
            r#"{ "material_id": "steel", "custom_part": { "req": 50, "orig": 1e308 } }"#,
        ));
        assert!(huge.get("thickness").is_none());
        assert_eq!(huge["error"]["code"], "INVALID_INPUT");
        assert_eq!(huge["error"]["field"], "orig");
    }

    #[test]
    fn test_dispatch_malformed_body() {
        let mut hub = NucleusHub::new();
        let value = json(&dispatch(&mut hub, "evaluate", "{ material_id: steel"));
        assert_eq!(value["error"]["code"], "SERIALIZATION_ERROR");
        assert_eq!(value["error"]["status"], 400);
    }

    #[test]
    fn test_dispatch_unknown_operation() {
        let mut hub = NucleusHub::new();
        let value = json(&dispatch(&mut hub, "delete", "{}"));
        assert_eq!(value["error"]["code"], "NOT_FOUND");
    }

    #[test]
    fn test_dispatch_listing_and_feed() {
        let mut hub = NucleusHub::new();
        dispatch(&mut hub, "add", r#"{ "name": "Olive Wood", "strength": 55, "contributor": "Lab_X" }"#);

        let listed = json(&dispatch(&mut hub, "list", r#"{ "search": "palm" }"#));
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["id"], "palm");

        let recent = json(&dispatch(&mut hub, "recent", r#"{ "limit": 1 }"#));
        assert_eq!(recent[0]["name"], "Olive Wood");
        assert_eq!(recent[0]["type"], "user_added");

        let feed = json(&dispatch(&mut hub, "feed", ""));
        assert_eq!(feed[0], "Lab_X added material: Olive Wood");
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::from_str_flexible("Recent-Materials").unwrap(), Operation::RecentMaterials);
        assert_eq!(Operation::from_str_flexible("calculate").unwrap(), Operation::Evaluate);
        assert_eq!(Operation::Submit.to_string(), "submit");
    }
}
