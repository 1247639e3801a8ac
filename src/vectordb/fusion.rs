//! Reciprocal Rank Fusion over independently ranked result sets.
//!
//! A candidate's fused score is `sum(1 / (k + rank))` over the sets it appears
//! in, with 1-based ranks. Equal scores keep the order in which candidates were
//! first seen when walking the sets in order, so fusion is deterministic for a
//! fixed input.

use std::collections::{HashMap, HashSet};

use super::model::{FusedHit, HitId, ScoredHit};

/// Contribution of a single rank position.
pub fn rrf_contribution(rank: usize, rank_constant: f32) -> f32 {
    1.0 / (rank_constant + rank as f32)
}

/// Fuses ranked result sets and returns at most `limit` hits, best first.
///
/// Repeated ids inside one set only count at their best (first) rank.
pub fn reciprocal_rank_fusion(
    result_sets: Vec<Vec<ScoredHit>>,
    rank_constant: f32,
    limit: usize,
) -> Vec<FusedHit> {
    if limit == 0 {
        return Vec::new();
    }

    let mut fused: Vec<FusedHit> = Vec::new();
    let mut position: HashMap<HitId, usize> = HashMap::new();

    for set in result_sets {
        let mut seen_in_set: HashSet<HitId> = HashSet::with_capacity(set.len());

        for (index, hit) in set.into_iter().enumerate() {
            if !seen_in_set.insert(hit.id.clone()) {
                continue;
            }

            let contribution = rrf_contribution(index + 1, rank_constant);
            match position.get(&hit.id) {
                Some(&slot) => fused[slot].score += contribution,
                None => {
                    position.insert(hit.id.clone(), fused.len());
                    fused.push(FusedHit {
                        id: hit.id,
                        score: contribution,
                        payload: hit.payload,
                    });
                }
            }
        }
    }

    // Stable sort keeps first-appearance order among equal scores.
    fused.sort_by(|a, b| b.score.total_cmp(&a.score));
    fused.truncate(limit);
    fused
}
