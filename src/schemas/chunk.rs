use serde::{Deserialize, Serialize};

/// One retrieved text snippet with its relevance scores.
///
/// The backend computes up to three scores per chunk: embedding cosine
/// similarity from the retrieval stage, a reranking score from the
/// cross-encoder stage, and a character-trigram overlap score. Any of
/// them may be absent depending on which stages ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    pub source: String,
    #[serde(default)]
    pub embedding_similarity_score: Option<f64>,
    #[serde(default)]
    pub reranking_score: Option<f64>,
    #[serde(default)]
    pub trigram_similarity_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_all_scores() {
        let chunk: Chunk = serde_json::from_str(
            r#"{
                "id": 7,
                "text": "Apples are a type of fruit that grows on trees.",
                "source": "FruitDB",
                "embedding_similarity_score": 0.9,
                "reranking_score": 1.0,
                "trigram_similarity_score": 0.42
            }"#,
        )
        .unwrap();

        assert_eq!(chunk.id, Some(7));
        assert_eq!(chunk.source, "FruitDB");
        assert_eq!(chunk.embedding_similarity_score, Some(0.9));
        assert_eq!(chunk.reranking_score, Some(1.0));
        assert_eq!(chunk.trigram_similarity_score, Some(0.42));
    }

    #[test]
    fn missing_and_null_scores_are_none() {
        let chunk: Chunk = serde_json::from_str(
            r#"{"text": "t", "source": "s", "reranking_score": null}"#,
        )
        .unwrap();

        assert_eq!(chunk.id, None);
        assert_eq!(chunk.embedding_similarity_score, None);
        assert_eq!(chunk.reranking_score, None);
        assert_eq!(chunk.trigram_similarity_score, None);
    }
}
