//! `POST /ask` request/response contract.

use super::upload::FileRepresentation;
use serde::{Deserialize, Serialize};

/// Question sent to the backend together with the stored file
/// representation and the model selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub filename: String,
    pub data_type: String,
    pub content: FileRepresentation,
    pub use_openai: bool,
}

/// Answer returned by the backend.
///
/// `confidence` is only set by the Hugging Face pathway (a 0–1 score);
/// the OpenAI pathway pins it to 1.0. The backend also sends a `service`
/// tag which the client does not read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub model: String,
    pub confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_wire_shape_matches_backend() {
        let rep: FileRepresentation = serde_json::from_value(json!({
            "type": "structured",
            "data": [{"a": 1}]
        }))
        .unwrap();
        let req = AskRequest {
            question: "What is the total?".into(),
            filename: "a.csv".into(),
            data_type: rep.data_type.clone(),
            content: rep,
            use_openai: false,
        };
        let wire = serde_json::to_value(&req).unwrap();
        assert_eq!(
            wire,
            json!({
                "question": "What is the total?",
                "filename": "a.csv",
                "data_type": "structured",
                "content": {"type": "structured", "data": [{"a": 1}]},
                "use_openai": false
            })
        );
    }

    #[test]
    fn response_tolerates_extra_fields_and_missing_confidence() {
        let resp: AskResponse = serde_json::from_value(json!({
            "answer": "42",
            "model": "gpt-3.5-turbo",
            "confidence": 1.0,
            "service": "openai"
        }))
        .unwrap();
        assert_eq!(resp.confidence, Some(1.0));

        let resp: AskResponse = serde_json::from_value(json!({
            "answer": "42",
            "model": "gpt-3.5-turbo"
        }))
        .unwrap();
        assert_eq!(resp.confidence, None);
    }
}
