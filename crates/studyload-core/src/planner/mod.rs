//! Weekly study planner.
//!
//! Turns a profile and a list of exams into a concrete week of tasks:
//! - Scores exams by urgency, ignorance, difficulty and credit load
//! - Splits the weekly minute budget across exams
//! - Cuts each exam's minutes into template-driven tasks
//! - Packs tasks into Mon..Sun under each day's capacity
//!
//! Planning is deterministic; "today" is always passed in by the caller.

pub mod allocation;
pub mod packer;
pub mod queue;
pub mod weight;

use std::collections::{HashMap, VecDeque};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::exam::{valid_exams, Exam};
use crate::profile::Profile;

pub use allocation::{allocate_budget, minimum_guarantee, Allocation};
pub use packer::{pack_days, week_shells, Day};
pub use queue::{build_task_queue, pick_task_type, template_for, Task, TaskIdGenerator, TaskType};
pub use weight::{planner_weight, simulator_weight, weigh_exams, WeightedExam};

/// The full output of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub week_start: NaiveDate,
    pub weekly_budget_min: u32,
    pub task_minutes: u32,
    pub allocations: Vec<Allocation>,
    pub days: Vec<Day>,
    /// Tasks that did not fit into any day.
    pub cut: Vec<Task>,
}

impl WeeklyPlan {
    /// Tasks scheduled on `date`, empty when the date is outside the week.
    pub fn tasks_for(&self, date: NaiveDate) -> &[Task] {
        self.days
            .iter()
            .find(|d| d.date == date)
            .map(|d| d.tasks.as_slice())
            .unwrap_or(&[])
    }

    /// Target minutes allocated to an exam this week.
    pub fn allocated_minutes(&self, exam_id: &str) -> u32 {
        self.allocations
            .iter()
            .find(|a| a.exam_id == exam_id)
            .map(|a| a.target_min)
            .unwrap_or(0)
    }

    /// Minutes of an exam's tasks actually placed into days.
    pub fn planned_minutes(&self, exam_id: &str) -> u32 {
        self.days
            .iter()
            .flat_map(|d| d.tasks.iter())
            .filter(|t| t.exam_id == exam_id)
            .map(|t| t.minutes)
            .sum()
    }

    pub fn total_planned_minutes(&self) -> u32 {
        self.days.iter().map(|d| d.planned_minutes()).sum()
    }

    pub fn cut_minutes(&self) -> u32 {
        self.cut.iter().map(|t| t.minutes).sum()
    }

    pub fn has_shortfall(&self) -> bool {
        !self.cut.is_empty()
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Builds weekly plans.
#[derive(Debug, Clone, Default)]
pub struct WeeklyPlanner;

impl WeeklyPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Plan the week containing `today`.
    ///
    /// # Arguments
    /// * `profile` - Goal mode, weekly budget, task length and daily capacity
    /// * `exams` - Upcoming exams; records without a name or date are ignored
    /// * `today` - Reference date for urgency and for picking the week
    pub fn build(&self, profile: &Profile, exams: &[Exam], today: NaiveDate) -> WeeklyPlan {
        let week_start = week_start_for(today);
        let weekly_budget_min = profile.weekly_budget_min();
        let task_minutes = profile.clamped_task_minutes();
        let goal = profile.goal_mode;

        let exams = valid_exams(exams);

        // 1. Weights
        let weighted = weigh_exams(&exams, today, goal);

        // 2. Budget split, sorted by target minutes
        let allocations = allocate_budget(&weighted, weekly_budget_min);

        // 3. Task queues in allocation (priority) order
        let names: HashMap<&str, &str> = exams
            .iter()
            .map(|e| (e.id.as_str(), e.name.as_str()))
            .collect();
        let mut ids = TaskIdGenerator::for_week(week_start);
        let mut queues: Vec<VecDeque<Task>> = allocations
            .iter()
            .map(|alloc| {
                let name = names.get(alloc.exam_id.as_str()).copied().unwrap_or_default();
                build_task_queue(alloc, name, goal, task_minutes, &mut ids)
            })
            .collect();

        // 4. Pack into days
        let mut days = week_shells(profile, week_start);
        let cut = pack_days(&mut days, &mut queues);

        tracing::debug!(
            %week_start,
            exams = exams.len(),
            weekly_budget_min,
            cut = cut.len(),
            "built weekly plan"
        );

        WeeklyPlan {
            week_start,
            weekly_budget_min,
            task_minutes,
            allocations,
            days,
            cut,
        }
    }
}

/// Convenience wrapper around [`WeeklyPlanner::build`].
pub fn build_weekly_plan(profile: &Profile, exams: &[Exam], today: NaiveDate) -> WeeklyPlan {
    WeeklyPlanner::new().build(profile, exams, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::GoalMode;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 7).unwrap()
    }

    fn exam(id: &str, days_out: i64) -> Exam {
        Exam::new(id, id.to_uppercase(), wednesday() + Duration::days(days_out))
    }

    #[test]
    fn week_starts_on_monday() {
        assert_eq!(
            week_start_for(wednesday()),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
        );
        let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(week_start_for(monday), monday);
        let sunday = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
        assert_eq!(week_start_for(sunday), monday);
    }

    #[test]
    fn empty_exam_list_yields_empty_plan() {
        let plan = build_weekly_plan(&Profile::default(), &[], wednesday());
        assert_eq!(plan.weekly_budget_min, 840);
        assert!(plan.allocations.is_empty());
        assert_eq!(plan.days.len(), 7);
        assert!(plan.days.iter().all(|d| d.tasks.is_empty()));
        assert!(plan.cut.is_empty());
    }

    #[test]
    fn invalid_exams_do_not_reach_the_plan() {
        let mut undated = exam("x", 3);
        undated.date = None;
        let plan = build_weekly_plan(&Profile::default(), &[undated, exam("a", 10)], wednesday());
        assert_eq!(plan.allocations.len(), 1);
        assert_eq!(plan.allocations[0].exam_id, "a");
    }

    #[test]
    fn tasks_carry_exam_names_and_clamped_length() {
        let profile = Profile {
            task_minutes: 200,
            ..Profile::default()
        };
        let plan = build_weekly_plan(&profile, &[exam("a", 10)], wednesday());
        assert_eq!(plan.task_minutes, 120);
        let first = &plan.days[0].tasks[0];
        assert_eq!(first.exam_name, "A");
        assert_eq!(first.minutes, 120);
    }

    #[test]
    fn plan_accessors_are_consistent() {
        let plan = build_weekly_plan(
            &Profile::default(),
            &[exam("a", 5), exam("b", 40)],
            wednesday(),
        );
        let placed = plan.planned_minutes("a") + plan.planned_minutes("b");
        assert_eq!(placed, plan.total_planned_minutes());
        assert_eq!(
            plan.allocated_minutes("a") + plan.allocated_minutes("b"),
            plan.weekly_budget_min
        );
        assert_eq!(plan.tasks_for(wednesday()).len(), plan.days[2].tasks.len());
        assert!(plan.tasks_for(wednesday() + Duration::days(30)).is_empty());
    }

    #[test]
    fn goal_mode_changes_task_mix() {
        let profile = Profile {
            goal_mode: GoalMode::Pass,
            ..Profile::default()
        };
        let plan = build_weekly_plan(&profile, &[exam("a", 10)], wednesday());
        assert_eq!(plan.days[0].tasks[0].task_type, TaskType::Practice);
    }
}
