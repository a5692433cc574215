use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A request addressed to one advisory agent.
///
/// This is the inbound wire contract: `type` is the agent's request-kind tag
/// (e.g. `EVALUATE_INVESTMENT`), `data` is the kind-specific payload and
/// `context` carries caller-supplied hints. Field names are camelCase on the
/// wire to match the dashboard shell that produces them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
    #[serde(default)]
    pub context: AdvisoryContext,
}

impl AdvisoryRequest {
    pub fn new(kind: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            data,
            context: AdvisoryContext::default(),
        }
    }

    pub fn with_context(mut self, context: AdvisoryContext) -> Self {
        self.context = context;
        self
    }
}

/// Caller-supplied hints that travel with every request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    /// Hurdle rate for investment decisions (e.g. 0.10 = 10%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_rate: Option<Decimal>,
    /// Longest acceptable payback period in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payback_period: Option<Decimal>,
}

/// The outbound wire contract: `{"status": "success", ...domain fields}` or
/// `{"status": "error", "message": ...}`. Never mutated after a handler
/// returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AdvisoryResponse {
    Success {
        #[serde(flatten)]
        body: serde_json::Value,
    },
    Error {
        message: String,
    },
}

impl AdvisoryResponse {
    /// Wrap a handler result. Non-object bodies are nested under `result` so
    /// the flattened envelope stays well-formed.
    pub fn success(body: serde_json::Value) -> Self {
        let body = match body {
            serde_json::Value::Object(_) => body,
            other => serde_json::json!({ "result": other }),
        };
        Self::Success { body }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// The standard response for a request-kind tag the agent does not route.
    pub fn unknown_kind(kind: &str) -> Self {
        Self::Error {
            message: format!("Unknown message type: {kind}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Field accessor for success bodies; `None` on errors or missing fields.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        match self {
            Self::Success { body } => body.get(name),
            Self::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn roundtrip_request() {
        let request = AdvisoryRequest::new(
            "EVALUATE_INVESTMENT",
            serde_json::json!({"investment": {"initialOutlay": "1000"}}),
        )
        .with_context(AdvisoryContext {
            industry: Some("software".to_string()),
            company_size: None,
            required_rate: Some(dec!(0.10)),
            max_payback_period: Some(dec!(3)),
        });

        let json = serde_json::to_string(&request).unwrap();
        let deserialized: AdvisoryRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, deserialized);
    }

    #[test]
    fn request_kind_serializes_as_type() {
        let request = AdvisoryRequest::new("ANALYZE_STRATEGY", serde_json::json!({}));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "ANALYZE_STRATEGY");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn context_defaults_when_absent() {
        let request: AdvisoryRequest =
            serde_json::from_str(r#"{"type": "FOO", "data": {}}"#).unwrap();
        assert_eq!(request.context, AdvisoryContext::default());
    }

    #[test]
    fn success_response_flattens_body() {
        let response = AdvisoryResponse::success(serde_json::json!({"npv": "500"}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["npv"], "500");
    }

    #[test]
    fn non_object_body_nested_under_result() {
        let response = AdvisoryResponse::success(serde_json::json!(42));
        assert_eq!(response.field("result"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn unknown_kind_message_format() {
        let response = AdvisoryResponse::unknown_kind("FOO");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "Unknown message type: FOO");
    }
}
