use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::chunk::Chunk;

/// Client-to-server frame on the `/ws` connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientFrame {
    Search { query: String, request_id: u64 },
}

impl ClientFrame {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Server-to-client frame on the `/ws` connection.
///
/// The envelope is `{ "action": ..., "data": ... }`. `results` data may be
/// a single chunk or an array of chunks; either way it decodes to a batch.
/// Actions this client does not know are preserved as [`ServerFrame::Unknown`]
/// so callers can log and ignore them instead of failing the connection.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerFrame {
    Results {
        request_id: Option<u64>,
        chunks: Vec<Chunk>,
    },
    Error {
        message: String,
    },
    Unknown {
        action: String,
    },
}

#[derive(Deserialize)]
struct RawEnvelope {
    action: String,
    #[serde(default)]
    request_id: Option<u64>,
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct ErrorData {
    message: String,
}

impl ServerFrame {
    pub fn decode(payload: &str) -> Result<Self, serde_json::Error> {
        let raw: RawEnvelope = serde_json::from_str(payload)?;
        Self::from_raw(raw)
    }

    pub fn decode_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawEnvelope = serde_json::from_slice(payload)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawEnvelope) -> Result<Self, serde_json::Error> {
        match raw.action.as_str() {
            "results" => {
                let chunks = if raw.data.is_array() {
                    serde_json::from_value(raw.data)?
                } else {
                    vec![serde_json::from_value(raw.data)?]
                };
                Ok(ServerFrame::Results {
                    request_id: raw.request_id,
                    chunks,
                })
            }
            "error" => {
                let data: ErrorData = serde_json::from_value(raw.data)?;
                Ok(ServerFrame::Error {
                    message: data.message,
                })
            }
            _ => Ok(ServerFrame::Unknown { action: raw.action }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_search_frame() {
        let frame = ClientFrame::Search {
            query: "cats".to_string(),
            request_id: 3,
        };
        let encoded = frame.encode().unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["action"], "search");
        assert_eq!(value["query"], "cats");
        assert_eq!(value["request_id"], 3);
    }

    #[test]
    fn decodes_results_array() {
        let frame = ServerFrame::decode(
            r#"{"action":"results","data":[
                {"text":"A cat is...","source":"wiki","embedding_similarity_score":0.91},
                {"text":"Cats purr.","source":"wiki"}
            ]}"#,
        )
        .unwrap();

        match frame {
            ServerFrame::Results { request_id, chunks } => {
                assert_eq!(request_id, None);
                assert_eq!(chunks.len(), 2);
                assert_eq!(chunks[0].text, "A cat is...");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn decodes_single_result_object_as_batch_of_one() {
        let frame = ServerFrame::decode(
            r#"{"action":"results","request_id":12,"data":{"text":"t","source":"s"}}"#,
        )
        .unwrap();

        match frame {
            ServerFrame::Results { request_id, chunks } => {
                assert_eq!(request_id, Some(12));
                assert_eq!(chunks.len(), 1);
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn decodes_error_frame() {
        let frame =
            ServerFrame::decode(r#"{"action":"error","data":{"message":"index offline"}}"#)
                .unwrap();
        assert_eq!(
            frame,
            ServerFrame::Error {
                message: "index offline".to_string()
            }
        );
    }

    #[test]
    fn unknown_action_is_tolerated() {
        let frame =
            ServerFrame::decode(r#"{"action":"end_of_stream","data":{"reason":"done"}}"#).unwrap();
        assert_eq!(
            frame,
            ServerFrame::Unknown {
                action: "end_of_stream".to_string()
            }
        );
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(ServerFrame::decode("not json at all").is_err());
        assert!(ServerFrame::decode(r#"{"data":{}}"#).is_err());
    }
}
