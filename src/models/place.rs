use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Place details as returned to callers.
///
/// Every field is copied from the upstream `result` object as-is, so numbers
/// keep their original representation. Absent fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    pub reviews: Value,
}

/// A raw place details response body.
#[derive(Debug, Clone)]
pub struct PlaceDetailsResponse(pub Value);

impl PlaceDetailsResponse {
    pub fn status(&self) -> Option<&Value> {
        self.0.get("status")
    }

    pub fn is_ok(&self) -> bool {
        self.status().and_then(Value::as_str) == Some("OK")
    }

    /// Picks the five summary fields out of `result`. Falsy or missing
    /// `reviews` become `[]`.
    pub fn summary(&self) -> PlaceSummary {
        let field = |name: &str| self.0.get("result").and_then(|r| r.get(name)).cloned();

        PlaceSummary {
            name: field("name"),
            rating: field("rating"),
            user_ratings_total: field("user_ratings_total"),
            url: field("url"),
            reviews: field("reviews")
                .filter(is_truthy)
                .unwrap_or_else(|| json!([])),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(value: Value) -> PlaceDetailsResponse {
        PlaceDetailsResponse(value)
    }

    #[test]
    fn test_missing_reviews_become_empty() {
        let summary = details(json!({
            "status": "OK",
            "result": { "name": "Cafe", "rating": 4.2 }
        }))
        .summary();

        assert_eq!(summary.reviews, json!([]));
        assert_eq!(summary.name, Some(json!("Cafe")));
    }

    #[test]
    fn test_null_reviews_become_empty() {
        let summary = details(json!({ "result": { "reviews": null } })).summary();
        assert_eq!(summary.reviews, json!([]));
    }

    #[test]
    fn test_absent_fields_are_omitted_from_body() {
        let summary = details(json!({ "status": "OK" })).summary();
        assert_eq!(serde_json::to_string(&summary).unwrap(), r#"{"reviews":[]}"#);
    }

    #[test]
    fn test_integer_rating_keeps_its_form() {
        let summary = details(json!({
            "status": "OK",
            "result": { "name": "A", "rating": 5, "user_ratings_total": 10, "url": "u" }
        }))
        .summary();

        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"name":"A","rating":5,"user_ratings_total":10,"url":"u","reviews":[]}"#
        );
    }

    #[test]
    fn test_null_fields_pass_through() {
        let summary = details(json!({ "result": { "name": null } })).summary();
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"name":null,"reviews":[]}"#
        );
    }

    #[test]
    fn test_reviews_pass_through_unmodified() {
        let review = json!({
            "author_name": "Ana",
            "rating": 5,
            "text": "Excelente",
            "time": 1700000000,
            "profile_photo_url": "https://example.com/a.png"
        });
        let summary = details(json!({ "result": { "reviews": [review.clone()] } })).summary();

        assert_eq!(summary.reviews, json!([review]));
    }

    #[test]
    fn test_status_must_be_literal_ok() {
        assert!(details(json!({ "status": "OK" })).is_ok());
        assert!(!details(json!({ "status": "ok" })).is_ok());
        assert!(!details(json!({ "status": 200 })).is_ok());
        assert!(!details(json!({})).is_ok());
    }

    #[test]
    fn test_odd_result_shape_yields_empty_summary() {
        let summary = details(json!({ "status": "OK", "result": "nope" })).summary();
        assert_eq!(serde_json::to_string(&summary).unwrap(), r#"{"reviews":[]}"#);
    }
}
