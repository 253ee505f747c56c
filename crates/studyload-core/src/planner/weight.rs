//! Exam priority weights.
//!
//! Two weight functions share the same factors but serve different outputs:
//! - [`planner_weight`] allocates a single week's budget and includes the
//!   goal-mode factor.
//! - [`simulator_weight`] drives the multi-week readiness forecast and
//!   raises the urgency term to a tunable power instead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::exam::Exam;
use crate::profile::GoalMode;

/// Clamp range for the simulator's urgency exponent.
pub const URGENCY_BOOST_RANGE: (f64, f64) = (0.5, 4.0);

/// `1 / (days + 3)`, decreasing in days remaining and finite at day 0.
pub fn urgency(days_to_exam: i64) -> f64 {
    1.0 / (days_to_exam as f64 + 3.0)
}

/// `6 - level`: 6 with no mastery, 1 with full mastery.
pub fn ignorance(exam: &Exam) -> f64 {
    (6 - exam.clamped_level()) as f64
}

pub fn difficulty_factor(exam: &Exam) -> f64 {
    1.0 + (exam.clamped_difficulty() - 1) as f64 * 0.25
}

/// Centered on 6 credits.
pub fn cfu_factor(exam: &Exam) -> f64 {
    1.0 + (exam.clamped_cfu() - 6) as f64 * 0.02
}

/// Weight used by the weekly planner.
pub fn planner_weight(exam: &Exam, today: NaiveDate, goal: GoalMode) -> f64 {
    let u = urgency(exam.days_until(today));
    goal.planner_factor()
        * (u * 12.0)
        * (ignorance(exam) / 3.0)
        * difficulty_factor(exam)
        * cfu_factor(exam)
}

/// Weight used by the readiness simulator on a given simulated day.
pub fn simulator_weight(exam: &Exam, day: NaiveDate, urgency_boost: f64) -> f64 {
    let boost = urgency_boost.clamp(URGENCY_BOOST_RANGE.0, URGENCY_BOOST_RANGE.1);
    let u = urgency(exam.days_until(day));
    (u * 12.0).powf(boost) * (ignorance(exam) / 3.0) * difficulty_factor(exam) * cfu_factor(exam)
}

/// Normalize raw weights to fractions summing to 1.
///
/// A zero (or non-finite) total falls back to equal shares.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        weights.iter().map(|w| w / total).collect()
    } else {
        vec![1.0 / weights.len() as f64; weights.len()]
    }
}

/// An exam's planning weight and its share of the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedExam {
    pub exam_id: String,
    pub weight: f64,
    pub fraction: f64,
}

/// Score every exam for the weekly planner.
pub fn weigh_exams(exams: &[Exam], today: NaiveDate, goal: GoalMode) -> Vec<WeightedExam> {
    let weights: Vec<f64> = exams
        .iter()
        .map(|e| planner_weight(e, today, goal))
        .collect();
    let fractions = normalize(&weights);

    exams
        .iter()
        .zip(weights)
        .zip(fractions)
        .map(|((exam, weight), fraction)| WeightedExam {
            exam_id: exam.id.clone(),
            weight,
            fraction,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn exam_in(days: i64) -> Exam {
        Exam::new("e", "Exam", today() + chrono::Duration::days(days))
    }

    #[test]
    fn baseline_exam_weight() {
        // 6 CFU, difficulty 2, level 0, 9 days out: 12/12 * 6/3 * 1.25 * 1.0
        let w = planner_weight(&exam_in(9), today(), GoalMode::Good);
        assert!((w - 2.5).abs() < 1e-12);
    }

    #[test]
    fn urgency_is_monotonic() {
        let near = planner_weight(&exam_in(2), today(), GoalMode::Good);
        let far = planner_weight(&exam_in(200), today(), GoalMode::Good);
        assert!(near > far);
        assert!(urgency(0).is_finite());
    }

    #[test]
    fn mastery_lowers_weight() {
        let novice = planner_weight(&exam_in(10), today(), GoalMode::Good);
        let expert = planner_weight(&exam_in(10).with_level(5), today(), GoalMode::Good);
        assert!((novice / expert - 6.0).abs() < 1e-12);
    }

    #[test]
    fn cfu_factor_is_centered_on_six() {
        assert_eq!(cfu_factor(&exam_in(1)), 1.0);
        assert!((cfu_factor(&exam_in(1).with_cfu(12)) - 1.12).abs() < 1e-12);
        assert!((cfu_factor(&exam_in(1).with_cfu(0)) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn simulator_weight_clamps_boost() {
        let exam = exam_in(1);
        let at_max = simulator_weight(&exam, today(), 4.0);
        let beyond = simulator_weight(&exam, today(), 10.0);
        assert_eq!(at_max, beyond);
        // urgency*12 == 3 here, so the boost amplifies the near exam
        assert!(simulator_weight(&exam, today(), 2.0) > simulator_weight(&exam, today(), 1.0));
    }

    #[test]
    fn normalize_handles_degenerate_weights() {
        assert_eq!(normalize(&[0.0, 0.0, 0.0, 0.0]), vec![0.25; 4]);
        let fr = normalize(&[1.0, 3.0]);
        assert_eq!(fr, vec![0.25, 0.75]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn weighted_fractions_sum_to_one() {
        let exams = vec![exam_in(3), exam_in(30).with_level(2), exam_in(90).with_cfu(12)];
        let weighted = weigh_exams(&exams, today(), GoalMode::Top);
        let sum: f64 = weighted.iter().map(|w| w.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
