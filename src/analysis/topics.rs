//! TF-IDF vectorization and LDA topic extraction.
//!
//! The vectorizer mirrors the usual document-frequency cut-offs: terms must
//! appear in at least `min_df` documents, in at most `max_df_ratio` of
//! them, and only the `max_features` most frequent survivors are kept.
//! Topics come from Latent Dirichlet Allocation fitted by collapsed Gibbs
//! sampling over the selected vocabulary, with a seeded RNG so runs are
//! reproducible.

use crate::config::VectorizerOptions;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

const ALPHA: f64 = 0.1;
const BETA: f64 = 0.01;

/// Dense TF-IDF matrix over a fixed term list.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub terms: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// One fitted topic: terms with weights, heaviest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub terms: Vec<(String, f64)>,
}

/// One output row of `analyze topics`.
#[derive(Debug, Clone, Serialize)]
pub struct TopicTermRow {
    pub language: String,
    pub topic: usize,
    pub rank: usize,
    pub term: String,
    pub weight: f64,
}

/// Select the vocabulary for a tokenized corpus.
///
/// Survivors are ordered by total corpus frequency, ties alphabetical, so
/// the term list is deterministic.
pub fn build_vocabulary(docs: &[Vec<String>], options: &VectorizerOptions) -> Vec<String> {
    let n_docs = docs.len();
    if n_docs == 0 {
        return Vec::new();
    }

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    let mut total_frequency: HashMap<&str, usize> = HashMap::new();
    for doc in docs {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *document_frequency.entry(term).or_default() += 1;
        }
        for term in doc {
            *total_frequency.entry(term.as_str()).or_default() += 1;
        }
    }

    let max_df = options.max_df_ratio * n_docs as f64;
    let mut candidates: Vec<(&str, usize)> = document_frequency
        .iter()
        .filter(|&(_, &df)| df >= options.min_df && (df as f64) <= max_df)
        .map(|(&term, _)| (term, total_frequency[term]))
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    candidates.truncate(options.max_features);

    candidates.into_iter().map(|(term, _)| term.to_string()).collect()
}

/// Compute an L2-normalized TF-IDF matrix over a fixed vocabulary.
pub fn tfidf_matrix(docs: &[Vec<String>], vocabulary: &[String]) -> TfidfMatrix {
    let n_docs = docs.len();
    let index: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, term)| (term.as_str(), i))
        .collect();

    let mut document_frequency = vec![0usize; vocabulary.len()];
    for doc in docs {
        let unique: HashSet<usize> = doc
            .iter()
            .filter_map(|t| index.get(t.as_str()).copied())
            .collect();
        for term_index in unique {
            document_frequency[term_index] += 1;
        }
    }

    let idf: Vec<f64> = document_frequency
        .iter()
        .map(|&df| ((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0)
        .collect();

    let rows = docs
        .iter()
        .map(|doc| {
            let mut row = vec![0.0f64; vocabulary.len()];
            for token in doc {
                if let Some(&term_index) = index.get(token.as_str()) {
                    row[term_index] += 1.0;
                }
            }
            for (value, idf_value) in row.iter_mut().zip(&idf) {
                *value *= idf_value;
            }
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for value in &mut row {
                    *value /= norm;
                }
            }
            row
        })
        .collect();

    TfidfMatrix {
        terms: vocabulary.to_vec(),
        rows,
    }
}

/// Fit LDA by collapsed Gibbs sampling and return the topics.
///
/// Tokens outside the vocabulary are ignored. Term weights are the smoothed
/// per-topic term probabilities.
pub fn lda_topics(
    docs: &[Vec<String>],
    vocabulary: &[String],
    n_topics: usize,
    iterations: usize,
    seed: u64,
    top_terms: usize,
) -> Vec<Topic> {
    if n_topics == 0 || vocabulary.is_empty() || docs.is_empty() {
        return Vec::new();
    }

    let index: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, term)| (term.as_str(), i))
        .collect();
    let doc_tokens: Vec<Vec<usize>> = docs
        .iter()
        .map(|doc| {
            doc.iter()
                .filter_map(|t| index.get(t.as_str()).copied())
                .collect()
        })
        .collect();

    let vocab_size = vocabulary.len();
    let mut topic_term = vec![vec![0usize; vocab_size]; n_topics];
    let mut topic_total = vec![0usize; n_topics];
    let mut doc_topic = vec![vec![0usize; n_topics]; docs.len()];
    let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(docs.len());

    let mut rng = StdRng::seed_from_u64(seed);

    for (d, tokens) in doc_tokens.iter().enumerate() {
        let mut doc_assignments = Vec::with_capacity(tokens.len());
        for &w in tokens {
            let topic = rng.random_range(0..n_topics);
            topic_term[topic][w] += 1;
            topic_total[topic] += 1;
            doc_topic[d][topic] += 1;
            doc_assignments.push(topic);
        }
        assignments.push(doc_assignments);
    }

    let beta_total = BETA * vocab_size as f64;
    let mut weights = vec![0.0f64; n_topics];

    for _ in 0..iterations {
        for (d, tokens) in doc_tokens.iter().enumerate() {
            for (pos, &w) in tokens.iter().enumerate() {
                let old_topic = assignments[d][pos];
                topic_term[old_topic][w] -= 1;
                topic_total[old_topic] -= 1;
                doc_topic[d][old_topic] -= 1;

                let mut total = 0.0;
                for (k, weight) in weights.iter_mut().enumerate() {
                    *weight = (doc_topic[d][k] as f64 + ALPHA)
                        * (topic_term[k][w] as f64 + BETA)
                        / (topic_total[k] as f64 + beta_total);
                    total += *weight;
                }

                let mut draw = rng.random_range(0.0..total);
                let mut new_topic = n_topics - 1;
                for (k, &weight) in weights.iter().enumerate() {
                    if draw < weight {
                        new_topic = k;
                        break;
                    }
                    draw -= weight;
                }

                topic_term[new_topic][w] += 1;
                topic_total[new_topic] += 1;
                doc_topic[d][new_topic] += 1;
                assignments[d][pos] = new_topic;
            }
        }
    }

    (0..n_topics)
        .map(|k| {
            let mut terms: Vec<(String, f64)> = vocabulary
                .iter()
                .enumerate()
                .map(|(w, term)| {
                    let weight =
                        (topic_term[k][w] as f64 + BETA) / (topic_total[k] as f64 + beta_total);
                    (term.clone(), weight)
                })
                .collect();
            terms.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(&b.0)));
            terms.truncate(top_terms);
            Topic { terms }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Vec<String>> {
        let raw = [
            vec!["remote", "work", "productivity", "remote"],
            vec!["team", "communication", "slack", "team"],
            vec!["remote", "productivity", "tools"],
            vec!["communication", "meeting", "team"],
            vec!["remote", "work", "balance"],
        ];
        raw.iter()
            .map(|d| d.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_vocabulary_applies_cutoffs() {
        let options = VectorizerOptions {
            max_features: 3,
            min_df: 2,
            max_df_ratio: 0.9,
        };
        let vocab = build_vocabulary(&docs(), &options);
        assert_eq!(vocab.len(), 3);
        // "remote" appears in 3 docs / 6 times, the corpus-frequency leader
        assert_eq!(vocab[0], "remote");
        // "slack" has df 1 and is cut by min_df
        assert!(!vocab.contains(&"slack".to_string()));
    }

    #[test]
    fn test_tfidf_rows_are_l2_normalized() {
        let vocab = build_vocabulary(&docs(), &VectorizerOptions::default());
        let matrix = tfidf_matrix(&docs(), &vocab);
        for row in &matrix.rows {
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9 || norm == 0.0);
        }
    }

    #[test]
    fn test_lda_is_deterministic_under_seed() {
        let vocab = build_vocabulary(&docs(), &VectorizerOptions::default());
        let a = lda_topics(&docs(), &vocab, 2, 30, 42, 5);
        let b = lda_topics(&docs(), &vocab, 2, 30, 42, 5);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        for topic in &a {
            assert!(topic.terms.len() <= 5);
            assert!(!topic.terms.is_empty());
        }
    }

    #[test]
    fn test_lda_terms_come_from_vocabulary() {
        let vocab = build_vocabulary(&docs(), &VectorizerOptions::default());
        let topics = lda_topics(&docs(), &vocab, 2, 10, 7, 10);
        for topic in &topics {
            for (term, weight) in &topic.terms {
                assert!(vocab.contains(term));
                assert!(*weight > 0.0);
            }
        }
    }

    #[test]
    fn test_empty_corpus_yields_no_topics() {
        assert!(lda_topics(&[], &[], 2, 10, 1, 10).is_empty());
    }
}
