//! Ranking utilities.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Indices of the `k` largest scores, highest first.
///
/// Non-finite and negative scores are skipped. Equal scores keep the lower index first.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() || score < 0.0 {
            continue;
        }
        let Ok(s) = NotNan::new(score) else { continue };
        let key = (s, Reverse(i));
        if heap.len() < k {
            heap.push(Reverse(key));
        } else if let Some(&Reverse(min_key)) = heap.peek() {
            if key > min_key {
                heap.pop();
                heap.push(Reverse(key));
            }
        }
    }
    let mut results: Vec<(usize, f64)> = heap
        .into_iter()
        .map(|Reverse((s, Reverse(i)))| (i, s.into_inner()))
        .collect();
    results.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    results
}
