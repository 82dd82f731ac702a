//! Response envelopes the clients depend on.
//!
//! The home overview wraps items in `{results}`, everything else in
//! `{status: 200, result}`. Detail lookups answer with either the document
//! or an informational message, both under HTTP 200.

use serde::Serialize;

/// `{results: [...]}`, the home overview envelope.
#[derive(Debug, Serialize)]
pub struct ResultsEnvelope<T> {
    pub results: Vec<T>,
}

/// `{status: 200, result: ...}`, the list, search and detail envelope.
#[derive(Debug, Serialize)]
pub struct StatusEnvelope<T> {
    pub status: u16,
    pub result: T,
}

impl<T> StatusEnvelope<T> {
    pub fn ok(result: T) -> Self {
        Self {
            status: 200,
            result,
        }
    }
}

/// Detail endpoint body: the stored document for released entities, an
/// informational message for known-but-unreleased ones.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DetailEnvelope {
    Found { status: u16, result: serde_json::Value },
    NotReleased { status: u16, message: String },
}

impl DetailEnvelope {
    pub fn found(document: serde_json::Value) -> Self {
        Self::Found {
            status: 200,
            result: document,
        }
    }

    pub fn not_released(resource: &str) -> Self {
        Self::NotReleased {
            status: 200,
            message: format!("{} is not released yet", resource),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelopes_serialize_to_the_wire_shapes() {
        let overview = serde_json::to_value(ResultsEnvelope { results: vec![1, 2] }).unwrap();
        assert_eq!(overview, json!({"results": [1, 2]}));

        let wrapped = serde_json::to_value(StatusEnvelope::ok("x")).unwrap();
        assert_eq!(wrapped, json!({"status": 200, "result": "x"}));

        let found = serde_json::to_value(DetailEnvelope::found(json!({"title": "T"}))).unwrap();
        assert_eq!(found, json!({"status": 200, "result": {"title": "T"}}));

        let gated = serde_json::to_value(DetailEnvelope::not_released("Movie")).unwrap();
        assert_eq!(
            gated,
            json!({"status": 200, "message": "Movie is not released yet"})
        );
    }
}
