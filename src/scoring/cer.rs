use serde::Serialize;

use super::normalize::normalize;

/// Outcome of comparing a transcript against a target sentence.
///
/// `error_rate` is the character error rate over normalized text, rounded to
/// four decimal places; `accuracy` is the display percentage derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub distance: usize,
    pub error_rate: f64,
    pub accuracy: f64,
}

/// Score a predicted transcript against the standard (target) sentence.
///
/// Both inputs are normalized first. An empty normalized standard yields an
/// error rate of 0.0 regardless of the prediction; otherwise the rate is
/// `distance / standard_len`. The rate may exceed 1.0 when the prediction is
/// longer than the standard, so accuracy clamps at 0.
pub fn score(prediction: &str, standard: &str) -> ScoreResult {
    let prediction: Vec<char> = normalize(prediction).chars().collect();
    let standard: Vec<char> = normalize(standard).chars().collect();
    let distance = levenshtein(&prediction, &standard);
    let error_rate = if standard.is_empty() {
        0.0
    } else {
        round4(distance as f64 / standard.len() as f64)
    };
    let accuracy = (1.0 - error_rate).max(0.0) * 100.0;
    ScoreResult {
        distance,
        error_rate,
        accuracy,
    }
}

/// Character-level Levenshtein distance with unit insert/delete/substitute
/// costs. Two-row DP, O(min(m, n)) memory.
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = short.len();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
