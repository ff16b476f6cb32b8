use serde::{Deserialize, Serialize};

use super::chunk::Chunk;

/// Response body of `GET /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub llm_summary: String,
    pub reranked_chunks: Vec<Chunk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
    message: String,
}

/// Extract a display message from a non-2xx response body.
///
/// The backend reports failures either as `{"detail": "..."}` or as
/// `{"error": {"message": "..."}}`; anything else falls back to the
/// status line.
pub fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(detail) = parsed.detail {
            return detail;
        }
        if let Some(error) = parsed.error {
            return error.message;
        }
    }
    format!("HTTP {status}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn decodes_search_response() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "llm_summary": "Explanation: cats are mammals (Confidence: 0.90)",
                "reranked_chunks": [{"text": "A cat is...", "source": "wiki"}],
                "original_query": "cats"
            }"#,
        )
        .unwrap();

        assert_eq!(response.reranked_chunks.len(), 1);
        assert_eq!(response.original_query.as_deref(), Some("cats"));
    }

    #[test]
    fn error_message_prefers_detail() {
        let message = error_message(
            StatusCode::NOT_FOUND,
            r#"{"detail": "No chunks found by personal search."}"#,
        );
        assert_eq!(message, "No chunks found by personal search.");
    }

    #[test]
    fn error_message_reads_nested_error_object() {
        let message = error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": {"message": "reranker offline"}}"#,
        );
        assert_eq!(message, "reranker offline");
    }

    #[test]
    fn error_message_falls_back_to_status_line() {
        let message = error_message(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(message, "HTTP 502 Bad Gateway");
    }
}
