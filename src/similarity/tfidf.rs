//! Weighting primitives shared by both backends.

use std::collections::HashMap;

/// Smoothed inverse document frequency: `ln((M + 1) / (df + 1)) + 1`.
#[inline]
pub fn smooth_idf(corpus_size: usize, document_frequency: usize) -> f64 {
    ((corpus_size as f64 + 1.0) / (document_frequency as f64 + 1.0)).ln() + 1.0
}

/// Sublinear term frequency: `1 + ln(tf)` for `tf > 0`, else `0`.
#[inline]
pub fn sublinear_tf(term_frequency: u32) -> f64 {
    if term_frequency == 0 {
        0.0
    } else {
        1.0 + f64::from(term_frequency).ln()
    }
}

/// Raw term counts of one corpus item.
pub fn term_counts<I>(terms: I) -> HashMap<String, u32>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Number of corpus items containing each term at least once.
pub fn document_frequencies(corpus: &[HashMap<String, u32>]) -> HashMap<&str, usize> {
    let mut df: HashMap<&str, usize> = HashMap::new();
    for counts in corpus {
        for term in counts.keys() {
            *df.entry(term.as_str()).or_insert(0) += 1;
        }
    }
    df
}

/// Clamps a cosine score into `[0, 1]`, mapping non-finite values to `0`.
#[inline]
pub fn clamp_unit(score: f64) -> f64 {
    if score.is_finite() {
        // `+ 0.0` turns `-0.0` into `0.0`.
        score.clamp(0.0, 1.0) + 0.0
    } else {
        0.0
    }
}
