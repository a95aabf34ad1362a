//! Content-similarity ranking over review text
//!
//! Builds term-frequency/inverse-document-frequency vectors for each
//! candidate's concatenated review text plus one query document (the review
//! text of places the user previously liked), and orders candidates by
//! cosine similarity to the query. This produces a second ranked list
//! surfaced alongside the primary ranking, never replacing it.

use std::collections::{HashMap, HashSet};

use stop_words::{get, LANGUAGE};

/// One candidate with its similarity to the query document
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityRank {
    /// Index into the candidate document list
    pub index: usize,
    pub similarity: f64,
}

/// Orders candidate documents by cosine similarity to the query, descending
///
/// IDF statistics come from the candidates plus the query document. Equal
/// similarities keep input order. Candidates with no shared vocabulary, and
/// all candidates when the query is empty, score zero.
pub fn rank_by_similarity(query_doc: &str, candidate_docs: &[String]) -> Vec<SimilarityRank> {
    let stop_words: HashSet<String> = get(LANGUAGE::English).into_iter().collect();

    let candidate_terms: Vec<Vec<String>> = candidate_docs
        .iter()
        .map(|doc| tokenize(doc, &stop_words))
        .collect();
    let query_terms = tokenize(query_doc, &stop_words);

    let idf = inverse_document_frequencies(&candidate_terms, &query_terms);

    let query_vector = tf_idf_vector(&query_terms, &idf);

    let mut ranks: Vec<SimilarityRank> = candidate_terms
        .iter()
        .enumerate()
        .map(|(index, terms)| SimilarityRank {
            index,
            similarity: cosine_similarity(&query_vector, &tf_idf_vector(terms, &idf)),
        })
        .collect();

    // Stable sort: equal similarities keep input order
    ranks.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranks
}

/// Lowercases, splits on non-alphanumeric characters, and drops stop words
/// and single-character fragments
fn tokenize(text: &str, stop_words: &HashSet<String>) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 1 && !stop_words.contains(*token))
        .map(|token| token.to_string())
        .collect()
}

/// Smoothed IDF over the candidate documents plus the query document
fn inverse_document_frequencies(
    candidate_terms: &[Vec<String>],
    query_terms: &[String],
) -> HashMap<String, f64> {
    let corpus_size = candidate_terms.len() + 1;

    let query_terms = query_terms.to_vec();
    let mut document_frequencies: HashMap<&str, usize> = HashMap::new();
    for terms in candidate_terms.iter().chain(std::iter::once(&query_terms)) {
        let unique: HashSet<&str> = terms.iter().map(|t| t.as_str()).collect();
        for term in unique {
            *document_frequencies.entry(term).or_insert(0) += 1;
        }
    }

    document_frequencies
        .into_iter()
        .map(|(term, df)| {
            let idf = ((1.0 + corpus_size as f64) / (1.0 + df as f64)).ln() + 1.0;
            (term.to_string(), idf)
        })
        .collect()
}

/// Term-frequency vector scaled by IDF
fn tf_idf_vector(terms: &[String], idf: &HashMap<String, f64>) -> HashMap<String, f64> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
    }

    counts
        .into_iter()
        .map(|(term, count)| {
            let weight = count * idf.get(term).copied().unwrap_or(1.0);
            (term.to_string(), weight)
        })
        .collect()
}

fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, weight)| b.get(term).map(|other| weight * other))
        .sum();

    let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
