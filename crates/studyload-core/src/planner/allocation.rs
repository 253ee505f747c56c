//! Weekly budget allocation.
//!
//! Every exam first receives a guaranteed minimum, the rest is split by
//! weight fraction and floored, and the rounding slack is handed out one
//! minute at a time so the allocations always sum to the budget exactly.

use serde::{Deserialize, Serialize};

use super::weight::{normalize, WeightedExam};

/// Per-exam share of the weekly budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub exam_id: String,
    pub target_min: u32,
}

/// Minutes reserved for every exam: `min(60, floor(budget * 0.08))`.
pub fn minimum_guarantee(weekly_budget: u32) -> u32 {
    60.min((weekly_budget as f64 * 0.08).floor() as u32)
}

/// Split `weekly_budget` minutes across the weighted exams.
///
/// Returned allocations are sorted by target minutes, highest first (ties
/// keep input order); this is the priority order used by the packer.
pub fn allocate_budget(weighted: &[WeightedExam], weekly_budget: u32) -> Vec<Allocation> {
    if weighted.is_empty() {
        return Vec::new();
    }

    let n = weighted.len() as u32;
    let weights: Vec<f64> = weighted.iter().map(|w| w.weight).collect();
    let fractions = normalize(&weights);

    // Guarantees may not overrun the budget when there are many exams.
    let guarantee = minimum_guarantee(weekly_budget).min(weekly_budget / n);
    let remaining = weekly_budget.saturating_sub(guarantee * n);

    let mut allocations: Vec<Allocation> = weighted
        .iter()
        .zip(fractions)
        .map(|(w, fraction)| Allocation {
            exam_id: w.exam_id.clone(),
            target_min: guarantee + (remaining as f64 * fraction).floor() as u32,
        })
        .collect();

    let used: u32 = allocations.iter().map(|a| a.target_min).sum();
    let mut slack = weekly_budget.saturating_sub(used);

    allocations.sort_by(|a, b| b.target_min.cmp(&a.target_min));

    let len = allocations.len();
    let mut idx = 0;
    while slack > 0 {
        allocations[idx % len].target_min += 1;
        slack -= 1;
        idx += 1;
    }

    tracing::debug!(
        exams = len,
        weekly_budget,
        guarantee,
        "allocated weekly budget"
    );

    allocations
}
