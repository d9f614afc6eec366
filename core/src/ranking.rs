//! Cosine similarity scoring and bounded, stable top-k selection.

use tracing::{debug, warn};

use crate::document::{Document, ScoredDocument};

/// Number of documents returned when the caller doesn't pick a limit.
pub const DEFAULT_LIMIT: usize = 3;

/// Cosine similarity of `a` and `b`.
///
/// Returns 0 when the vectors differ in dimension, either one has zero
/// magnitude (including empty vectors), or a component isn't finite, so the
/// result is never NaN. Each vector is scaled by its largest absolute component
/// before squaring, which keeps large magnitudes from overflowing.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let (Some(scale_a), Some(scale_b)) = (max_abs(a), max_abs(b)) else {
        return 0.0;
    };

    let (mut dot, mut norm_a, mut norm_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (x / scale_a, y / scale_b);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if similarity.is_finite() {
        similarity
    } else {
        0.0
    }
}

/// Largest absolute component, `None` for empty, all-zero or non-finite vectors.
fn max_abs(v: &[f64]) -> Option<f64> {
    let mut max = 0.0_f64;
    for x in v {
        if !x.is_finite() {
            return None;
        }
        max = max.max(x.abs());
    }
    (max > 0.0).then_some(max)
}

/// Scores `documents` against `query` and returns at most `limit` of them,
/// highest similarity first.
///
/// Equal scores keep their input order. Documents without an embedding are
/// left out entirely. A document whose embedding dimension differs from the
/// query's scores 0 and is reported with a warning.
#[must_use]
pub fn rank<I>(query: &[f64], documents: I, limit: usize) -> Vec<ScoredDocument>
where
    I: IntoIterator<Item = Document>,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<ScoredDocument> = documents
        .into_iter()
        .filter_map(|document| {
            let Some(embedding) = document.embedding.as_deref() else {
                debug!(id = %document.id, "Skipping document without embedding");
                return None;
            };
            if !query.is_empty() && !embedding.is_empty() && embedding.len() != query.len() {
                warn!(
                    id = %document.id,
                    query_dimension = query.len(),
                    document_dimension = embedding.len(),
                    "Embedding dimension mismatch, scoring as 0"
                );
            }
            let score = cosine_similarity(query, embedding);
            Some(ScoredDocument { document, score })
        })
        .collect();

    // `sort_by` is stable, ties stay in insertion order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, embedding: Vec<f64>) -> Document {
        Document::new(id, id).with_embedding(embedding)
    }

    fn ids(ranked: &[ScoredDocument]) -> Vec<&str> {
        ranked.iter().map(ScoredDocument::id).collect()
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_large_and_non_finite() {
        let big = [1e200, 1e200];
        assert!((cosine_similarity(&[1.0, 0.0], &big) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((cosine_similarity(&big, &big) - 1.0).abs() < 1e-12);
        assert!((cosine_similarity(&[1e-300, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);

        assert_eq!(cosine_similarity(&[f64::NAN, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[f64::INFINITY, 0.0]), 0.0);
    }

    #[test]
    fn test_rank_never_puts_nan_first() {
        let documents = vec![
            doc("good", vec![1.0, 0.0]),
            doc("weird", vec![f64::NAN, 0.0]),
            doc("big", vec![1e200, 1e200]),
        ];
        let ranked = rank(&[1.0, 0.0], documents, 3);

        assert_eq!(ids(&ranked), vec!["good", "big", "weird"]);
        assert!(ranked.iter().all(|r| r.score.is_finite()));
        assert_eq!(ranked[2].score, 0.0);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_rank_orders_descending() {
        let documents = vec![
            doc("id1", vec![1.0, 2.0, 3.0]),
            doc("id2", vec![4.0, 5.0, 6.0]),
            doc("id3", vec![7.0, 8.0, 9.0]),
        ];
        let ranked = rank(&[1.0, 2.0, 3.0], documents, 2);

        assert_eq!(ids(&ranked), vec!["id1", "id2"]);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_rank_ties_keep_insertion_order() {
        let documents = vec![
            doc("low", vec![0.0, 1.0]),
            doc("first", vec![1.0, 0.0]),
            doc("second", vec![2.0, 0.0]),
            doc("third", vec![1.0, 0.0]),
        ];
        let ranked = rank(&[1.0, 0.0], documents, 10);
        assert_eq!(ids(&ranked), vec!["first", "second", "third", "low"]);
    }

    #[test]
    fn test_rank_limits() {
        let documents = || vec![doc("a", vec![1.0]), doc("b", vec![1.0])];
        assert!(rank(&[1.0], documents(), 0).is_empty());
        assert_eq!(rank(&[1.0], documents(), 1).len(), 1);
        assert_eq!(rank(&[1.0], documents(), 5).len(), 2);
        assert!(rank(&[1.0], Vec::new(), 3).is_empty());
    }

    #[test]
    fn test_rank_zero_signal_and_mismatch_score_zero() {
        let documents = vec![
            doc("empty", vec![]),
            doc("mismatch", vec![1.0, 0.0, 0.0]),
            doc("negative", vec![-1.0, 0.0]),
            doc("match", vec![1.0, 0.0]),
        ];
        let ranked = rank(&[1.0, 0.0], documents, 10);

        assert_eq!(ids(&ranked), vec!["match", "empty", "mismatch", "negative"]);
        assert_eq!(ranked[1].score, 0.0);
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn test_rank_empty_query_scores_everything_zero() {
        let documents = vec![doc("a", vec![1.0]), doc("b", vec![2.0])];
        let ranked = rank(&[], documents, 3);
        assert_eq!(ids(&ranked), vec!["a", "b"]);
        assert!(ranked.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_rank_excludes_documents_without_embedding() {
        let documents = vec![
            Document::new("unembedded", "no vector"),
            doc("embedded", vec![1.0]),
        ];
        let ranked = rank(&[1.0], documents, 3);
        assert_eq!(ids(&ranked), vec!["embedded"]);
    }
}
