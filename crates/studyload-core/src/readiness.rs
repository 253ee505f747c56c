//! Display readiness estimator.
//!
//! A single-week estimate for the dashboard badge, separate from the
//! multi-week simulator. It compares the study time an exam needs with the
//! time left before it and with this week's allocation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::exam::{valid_exams, Exam};
use crate::planner::weight::difficulty_factor;
use crate::planner::WeeklyPlan;
use crate::profile::{GoalMode, Profile};

/// Self-study hours per credit at `good` goal mode.
pub const HOURS_PER_CREDIT: f64 = 12.0;
/// Share of nominal availability that is realistically used.
pub const REALISM_DISCOUNT: f64 = 0.85;
/// Fraction of the requirement one week of allocation is measured against.
const WEEKLY_SHARE: f64 = 0.35;
const CAPACITY_WEIGHT: f64 = 0.70;
const WEEK_WEIGHT: f64 = 0.30;

/// Badge shown next to an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBadge {
    /// 85% and above
    OnTrack,
    /// 60% to 85%
    Borderline,
    /// Below 60%
    AtRisk,
}

impl From<f64> for ReadinessBadge {
    fn from(percent: f64) -> Self {
        if percent >= 85.0 {
            ReadinessBadge::OnTrack
        } else if percent >= 60.0 {
            ReadinessBadge::Borderline
        } else {
            ReadinessBadge::AtRisk
        }
    }
}

impl ReadinessBadge {
    pub fn label(&self) -> &'static str {
        match self {
            ReadinessBadge::OnTrack => "on track",
            ReadinessBadge::Borderline => "borderline",
            ReadinessBadge::AtRisk => "at risk",
        }
    }
}

/// Readiness estimate for one exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessEstimate {
    pub exam_id: String,
    pub exam_name: String,
    pub required_min: f64,
    pub capacity_min: f64,
    pub week_min: u32,
    pub percent: f64,
    pub badge: ReadinessBadge,
}

/// Minutes of study an exam still needs.
///
/// credits x calibrated hours per credit x difficulty x remaining mastery,
/// where remaining mastery is `(6 - level) / 6`.
pub fn required_minutes(exam: &Exam, goal: GoalMode) -> f64 {
    let remaining_mastery = (6 - exam.clamped_level()) as f64 / 6.0;
    exam.clamped_cfu() as f64
        * HOURS_PER_CREDIT
        * goal.requirement_factor()
        * 60.0
        * difficulty_factor(exam)
        * remaining_mastery
}

/// Realistic study minutes available before the exam.
pub fn capacity_until_exam(exam: &Exam, profile: &Profile, today: NaiveDate) -> f64 {
    exam.days_until(today) as f64 * profile.day_minutes.daily_average() * REALISM_DISCOUNT
}

/// Blend capacity coverage and this week's allocation into a percentage.
pub fn readiness_percent(required_min: f64, capacity_min: f64, week_min: u32) -> f64 {
    if required_min <= 0.0 {
        return 100.0;
    }
    let blend = CAPACITY_WEIGHT * (capacity_min / required_min)
        + WEEK_WEIGHT * (week_min as f64 / (required_min * WEEKLY_SHARE));
    (blend * 100.0).clamp(0.0, 100.0)
}

/// Estimate one exam given its allocation for the current week.
pub fn estimate_readiness(
    exam: &Exam,
    profile: &Profile,
    week_min: u32,
    today: NaiveDate,
) -> ReadinessEstimate {
    let required_min = required_minutes(exam, profile.goal_mode);
    let capacity_min = capacity_until_exam(exam, profile, today);
    let percent = readiness_percent(required_min, capacity_min, week_min);

    ReadinessEstimate {
        exam_id: exam.id.clone(),
        exam_name: exam.name.clone(),
        required_min,
        capacity_min,
        week_min,
        percent,
        badge: ReadinessBadge::from(percent),
    }
}

/// Estimate every valid exam against a built plan.
pub fn estimate_plan_readiness(
    plan: &WeeklyPlan,
    profile: &Profile,
    exams: &[Exam],
    today: NaiveDate,
) -> Vec<ReadinessEstimate> {
    valid_exams(exams)
        .iter()
        .map(|exam| estimate_readiness(exam, profile, plan.allocated_minutes(&exam.id), today))
        .collect()
}
