use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("event payload is null")]
pub struct NullEvent;

/// Just enough of an API Gateway proxy event to detect CORS preflight.
///
/// HTTP APIs (payload v2) carry the method under `requestContext.http.method`,
/// REST APIs (payload v1) under `httpMethod`. Any other shape simply has no
/// method; only a `null` payload is rejected.
#[derive(Debug, Clone, Default)]
pub struct InvocationEvent {
    method: Option<String>,
}

impl TryFrom<Value> for InvocationEvent {
    type Error = NullEvent;

    fn try_from(payload: Value) -> Result<Self, Self::Error> {
        if payload.is_null() {
            return Err(NullEvent);
        }

        let method = payload
            .pointer("/requestContext/http/method")
            .and_then(Value::as_str)
            .or_else(|| payload.get("httpMethod").and_then(Value::as_str))
            .map(str::to_string);

        Ok(Self { method })
    }
}

impl InvocationEvent {
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn is_preflight(&self) -> bool {
        self.method()
            .map(|m| m.eq_ignore_ascii_case("OPTIONS"))
            .unwrap_or(false)
    }
}
