//! "What-if" scenario overrides.
//!
//! Overrides never touch the caller's profile or exams. [`ScenarioOverrides::apply`]
//! builds derived copies that the simulator runs on instead.

use serde::{Deserialize, Serialize};

use crate::exam::Exam;
use crate::profile::{
    DayMinutes, GoalMode, Profile, Weekday, MAX_DAY_MINUTES, MAX_TASK_MINUTES, MAX_WEEKLY_HOURS,
    MIN_TASK_MINUTES,
};

/// Clamp range for the boost multiplier.
pub const BOOST_FACTOR_RANGE: (f64, f64) = (0.5, 3.0);

/// Optional deltas applied before simulating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOverrides {
    /// Extra (or, if negative, fewer) weekly hours spread over Mon..Sat.
    #[serde(default)]
    pub delta_hours: Option<f64>,
    #[serde(default)]
    pub goal_mode: Option<GoalMode>,
    #[serde(default)]
    pub task_minutes: Option<u32>,
    /// Exam removed from the simulated set.
    #[serde(default)]
    pub drop_exam_id: Option<String>,
    /// Exam whose simulator weight is multiplied by `boost_factor`.
    #[serde(default)]
    pub boost_exam_id: Option<String>,
    #[serde(default)]
    pub boost_factor: Option<f64>,
}

/// Weight multiplier for a single exam during simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamBoost {
    pub exam_id: String,
    pub factor: f64,
}

/// Derived inputs the simulator runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioInputs {
    pub profile: Profile,
    pub exams: Vec<Exam>,
    pub boost: Option<ExamBoost>,
}

impl ScenarioOverrides {
    /// No overrides: the baseline scenario.
    pub fn baseline() -> Self {
        Self::default()
    }

    pub fn is_baseline(&self) -> bool {
        self.delta_hours.map(|h| h == 0.0).unwrap_or(true)
            && self.goal_mode.is_none()
            && self.task_minutes.is_none()
            && self.drop_exam_id.is_none()
            && self.boost_exam_id.is_none()
    }

    pub fn with_delta_hours(mut self, hours: f64) -> Self {
        self.delta_hours = Some(hours);
        self
    }

    pub fn with_goal_mode(mut self, goal: GoalMode) -> Self {
        self.goal_mode = Some(goal);
        self
    }

    pub fn with_task_minutes(mut self, minutes: u32) -> Self {
        self.task_minutes = Some(minutes);
        self
    }

    pub fn dropping(mut self, exam_id: impl Into<String>) -> Self {
        self.drop_exam_id = Some(exam_id.into());
        self
    }

    pub fn boosting(mut self, exam_id: impl Into<String>, factor: f64) -> Self {
        self.boost_exam_id = Some(exam_id.into());
        self.boost_factor = Some(factor);
        self
    }

    /// Build the derived profile and exam list for this scenario.
    pub fn apply(&self, profile: &Profile, exams: &[Exam]) -> ScenarioInputs {
        let mut derived = profile.clone();

        if let Some(hours) = self.delta_hours.filter(|h| h.is_finite() && *h != 0.0) {
            let hours = hours.clamp(-MAX_WEEKLY_HOURS, MAX_WEEKLY_HOURS);
            let delta_min = (hours * 60.0).round() as i64;
            derived.day_minutes = redistribute_delta(&profile.day_minutes, delta_min);
            derived.weekly_hours = profile.clamped_weekly_hours() + hours;
        }
        if let Some(goal) = self.goal_mode {
            derived.goal_mode = goal;
        }
        if let Some(minutes) = self.task_minutes {
            derived.task_minutes = minutes.clamp(MIN_TASK_MINUTES, MAX_TASK_MINUTES);
        }

        let exams: Vec<Exam> = exams
            .iter()
            .filter(|e| self.drop_exam_id.as_deref() != Some(e.id.as_str()))
            .cloned()
            .collect();

        let boost = self.boost_exam_id.as_ref().map(|exam_id| ExamBoost {
            exam_id: exam_id.clone(),
            factor: clamp_boost(self.boost_factor.unwrap_or(1.0)),
        });

        ScenarioInputs {
            profile: derived,
            exams,
            boost,
        }
    }
}

fn clamp_boost(factor: f64) -> f64 {
    if factor.is_finite() {
        factor.clamp(BOOST_FACTOR_RANGE.0, BOOST_FACTOR_RANGE.1)
    } else {
        1.0
    }
}

/// Spread `delta_min` minutes over Mon..Sat in proportion to each day's
/// share of the Mon..Sat total. Sunday is left untouched.
///
/// Whole-minute shares are truncated; the leftover minutes go one at a time
/// to the days with the largest fractional remainder. Days stay within
/// [0, 1440].
///
/// The delta is clamped first: removing more than the Mon..Sat total, or
/// adding enough to fill every studied day, gives the same result as the
/// bound itself.
pub fn redistribute_delta(days: &DayMinutes, delta_min: i64) -> DayMinutes {
    let mut result = *days;

    let current: Vec<i64> = Weekday::WORKDAYS
        .iter()
        .map(|d| days.get(*d) as i64)
        .collect();
    let total: i64 = current.iter().sum();

    let max_gain = MAX_DAY_MINUTES as i64 * total.max(Weekday::WORKDAYS.len() as i64);
    let delta_min = delta_min.clamp(-total, max_gain);
    if delta_min == 0 {
        return result;
    }

    let exact: Vec<f64> = current
        .iter()
        .map(|m| {
            if total > 0 {
                delta_min as f64 * *m as f64 / total as f64
            } else {
                delta_min as f64 / Weekday::WORKDAYS.len() as f64
            }
        })
        .collect();

    let mut shares: Vec<i64> = exact.iter().map(|x| x.trunc() as i64).collect();
    let assigned = shares.iter().fold(0i64, |acc, s| acc.saturating_add(*s));
    let mut leftover = delta_min.saturating_sub(assigned);

    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|a, b| {
        let fa = (exact[*a] - exact[*a].trunc()).abs();
        let fb = (exact[*b] - exact[*b].trunc()).abs();
        fb.partial_cmp(&fa).unwrap_or(std::cmp::Ordering::Equal)
    });

    let step = leftover.signum();
    let mut i = 0;
    while leftover != 0 {
        shares[order[i % order.len()]] += step;
        leftover -= step;
        i += 1;
    }

    for ((day, minutes), share) in Weekday::WORKDAYS.iter().zip(&current).zip(&shares) {
        let adjusted = minutes.saturating_add(*share).clamp(0, MAX_DAY_MINUTES as i64);
        result.set(*day, adjusted as u32);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn profile() -> Profile {
        Profile::default()
    }

    fn exams() -> Vec<Exam> {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        vec![Exam::new("a", "Algebra", date), Exam::new("b", "Biology", date)]
    }

    fn workday_total(days: &DayMinutes) -> u32 {
        Weekday::WORKDAYS.iter().map(|d| days.get(*d)).sum()
    }

    #[test]
    fn delta_spreads_proportionally_and_exactly() {
        // Mon..Fri 120, Sat 180: total 780
        let days = redistribute_delta(&profile().day_minutes, 120);
        assert_eq!(workday_total(&days), 900);
        assert_eq!(days.sun, 0);
        assert!(days.sat > days.mon);
    }

    #[test]
    fn odd_delta_leftovers_are_assigned() {
        let days = redistribute_delta(&DayMinutes::uniform(60), 7);
        assert_eq!(workday_total(&days), 367);
        assert_eq!(days.sun, 60);
        let values: Vec<u32> = Weekday::WORKDAYS.iter().map(|d| days.get(*d)).collect();
        assert!(values.iter().all(|v| *v == 61 || *v == 62));
    }

    #[test]
    fn negative_delta_never_goes_below_zero() {
        let days = redistribute_delta(&profile().day_minutes, -10_000);
        assert_eq!(workday_total(&days), 0);
    }

    #[test]
    fn huge_deltas_are_clamped() {
        let days = redistribute_delta(&profile().day_minutes, i64::MAX);
        assert!(Weekday::WORKDAYS.iter().all(|d| days.get(*d) == 1440));
        assert_eq!(days.sun, 0);

        let days = redistribute_delta(&profile().day_minutes, i64::MIN);
        assert_eq!(workday_total(&days), 0);
        assert_eq!(days.sun, 0);
    }

    #[test]
    fn extreme_delta_hours_do_not_panic() {
        let more = ScenarioOverrides::baseline()
            .with_delta_hours(1e300)
            .apply(&profile(), &exams());
        assert!(Weekday::WORKDAYS
            .iter()
            .all(|d| more.profile.day_minutes.get(*d) == 1440));
        assert_eq!(more.profile.weekly_budget_min(), 168 * 60);

        let less = ScenarioOverrides::baseline()
            .with_delta_hours(-1e300)
            .apply(&profile(), &exams());
        assert_eq!(workday_total(&less.profile.day_minutes), 0);
        assert_eq!(less.profile.weekly_budget_min(), 0);
    }

    #[test]
    fn empty_week_gets_equal_shares() {
        let days = redistribute_delta(&DayMinutes::default(), 60);
        assert!(Weekday::WORKDAYS.iter().all(|d| days.get(*d) == 10));
        assert_eq!(days.sun, 0);
    }

    #[test]
    fn apply_leaves_originals_untouched() {
        let original = profile();
        let exams = exams();
        let overrides = ScenarioOverrides::baseline()
            .with_delta_hours(2.0)
            .with_goal_mode(GoalMode::Top)
            .with_task_minutes(500)
            .dropping("b")
            .boosting("a", 9.0);

        let derived = overrides.apply(&original, &exams);

        assert_eq!(original, Profile::default());
        assert_eq!(exams.len(), 2);
        assert_eq!(derived.profile.goal_mode, GoalMode::Top);
        assert_eq!(derived.profile.task_minutes, 120);
        assert_eq!(derived.profile.weekly_hours, 16.0);
        assert_eq!(derived.exams.len(), 1);
        assert_eq!(derived.exams[0].id, "a");
        assert_eq!(
            derived.boost,
            Some(ExamBoost {
                exam_id: "a".into(),
                factor: 3.0
            })
        );
    }

    #[test]
    fn baseline_detection() {
        assert!(ScenarioOverrides::baseline().is_baseline());
        assert!(ScenarioOverrides::baseline().with_delta_hours(0.0).is_baseline());
        assert!(!ScenarioOverrides::baseline().dropping("a").is_baseline());
    }
}
