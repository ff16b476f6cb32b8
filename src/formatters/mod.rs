use crate::schemas::Chunk;

/// Format a single optional score: three decimal places, or "N/A".
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.3}"),
        None => "N/A".to_string(),
    }
}

/// Format the score line shown under every result record.
pub fn format_scores(chunk: &Chunk) -> String {
    format!(
        "(Similarity: {}, Rerank Score: {}, Trigram: {})",
        format_score(chunk.embedding_similarity_score),
        format_score(chunk.reranking_score),
        format_score(chunk.trigram_similarity_score)
    )
}

/// Format one ranked result record for terminal output.
pub fn format_chunk(chunk: &Chunk, rank: usize, use_color: bool) -> String {
    use colored::Colorize;

    if use_color {
        format!(
            "{} {}\n   Source: {} {}",
            format!("{rank}.").bright_blue().bold(),
            chunk.text,
            chunk.source.bright_green(),
            format_scores(chunk).dimmed()
        )
    } else {
        format!(
            "{rank}. {}\n   Source: {} {}",
            chunk.text,
            chunk.source,
            format_scores(chunk)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(sim: Option<f64>, rerank: Option<f64>, trigram: Option<f64>) -> Chunk {
        Chunk {
            id: None,
            text: "A cat is...".to_string(),
            source: "wiki".to_string(),
            embedding_similarity_score: sim,
            reranking_score: rerank,
            trigram_similarity_score: trigram,
        }
    }

    #[test]
    fn score_renders_three_decimal_places() {
        assert_eq!(format_score(Some(0.8234567)), "0.823");
        assert_eq!(format_score(Some(0.91)), "0.910");
        assert_eq!(format_score(Some(1.0)), "1.000");
    }

    #[test]
    fn missing_score_renders_na() {
        assert_eq!(format_score(None), "N/A");
    }

    #[test]
    fn score_line_matches_expected_shape() {
        let line = format_scores(&chunk(Some(0.91), Some(0.77), None));
        assert_eq!(line, "(Similarity: 0.910, Rerank Score: 0.770, Trigram: N/A)");
    }

    #[test]
    fn plain_record_includes_rank_text_and_source() {
        let record = format_chunk(&chunk(Some(0.91), Some(0.77), None), 1, false);
        assert_eq!(
            record,
            "1. A cat is...\n   Source: wiki (Similarity: 0.910, Rerank Score: 0.770, Trigram: N/A)"
        );
    }
}
