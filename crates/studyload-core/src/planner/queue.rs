//! Task queue construction.
//!
//! Each exam's target minutes are cut into fixed-length study tasks whose
//! category cycles through a goal-mode specific template.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::allocation::Allocation;
use crate::profile::GoalMode;

/// Leftover minutes below this are dropped instead of becoming a micro task.
pub const MIN_MICRO_TASK_MINUTES: u32 = 15;

/// Category of a study task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Theory,
    Practice,
    Exam,
    Review,
}

impl TaskType {
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Theory => "Theory study",
            TaskType::Practice => "Practice exercises",
            TaskType::Exam => "Past exam simulation",
            TaskType::Review => "Review & recap",
        }
    }
}

const PASS_CYCLE: [TaskType; 6] = [
    TaskType::Practice,
    TaskType::Exam,
    TaskType::Practice,
    TaskType::Exam,
    TaskType::Theory,
    TaskType::Review,
];

const GOOD_CYCLE: [TaskType; 4] = [
    TaskType::Theory,
    TaskType::Practice,
    TaskType::Exam,
    TaskType::Review,
];

const TOP_CYCLE: [TaskType; 6] = [
    TaskType::Theory,
    TaskType::Exam,
    TaskType::Theory,
    TaskType::Practice,
    TaskType::Exam,
    TaskType::Review,
];

/// Ordered category cycle for a goal mode.
pub fn template_for(goal: GoalMode) -> &'static [TaskType] {
    match goal {
        GoalMode::Pass => &PASS_CYCLE,
        GoalMode::Good => &GOOD_CYCLE,
        GoalMode::Top => &TOP_CYCLE,
    }
}

/// Category of the `index`-th task of an exam.
pub fn pick_task_type(goal: GoalMode, index: usize) -> TaskType {
    let cycle = template_for(goal);
    cycle[index % cycle.len()]
}

/// A unit of study work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub exam_id: String,
    pub exam_name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub label: String,
    pub minutes: u32,
    /// Owned by the caller's completion tracking; always `false` when planned.
    #[serde(default)]
    pub done: bool,
}

/// Hands out task identifiers for one planning run.
///
/// Identifiers are name-based UUIDs derived from the week and a running
/// sequence number, so a plan rebuilt from the same inputs gets the same ids.
#[derive(Debug, Clone)]
pub struct TaskIdGenerator {
    namespace: Uuid,
    next: u64,
}

impl TaskIdGenerator {
    pub fn for_week(week_start: NaiveDate) -> Self {
        Self {
            namespace: Uuid::new_v5(&Uuid::NAMESPACE_OID, week_start.to_string().as_bytes()),
            next: 0,
        }
    }

    pub fn next_id(&mut self, exam_id: &str) -> String {
        let name = format!("{exam_id}/{}", self.next);
        self.next += 1;
        Uuid::new_v5(&self.namespace, name.as_bytes()).to_string()
    }
}

/// Expand one allocation into its FIFO task queue.
pub fn build_task_queue(
    allocation: &Allocation,
    exam_name: &str,
    goal: GoalMode,
    task_minutes: u32,
    ids: &mut TaskIdGenerator,
) -> VecDeque<Task> {
    let task_minutes = task_minutes.max(1);
    let task_count = (allocation.target_min / task_minutes).max(1);

    let mut queue = VecDeque::with_capacity(task_count as usize + 1);
    for i in 0..task_count as usize {
        let task_type = pick_task_type(goal, i);
        queue.push_back(Task {
            id: ids.next_id(&allocation.exam_id),
            exam_id: allocation.exam_id.clone(),
            exam_name: exam_name.to_string(),
            task_type,
            label: task_type.label().to_string(),
            minutes: task_minutes,
            done: false,
        });
    }

    let remainder = allocation
        .target_min
        .saturating_sub(task_count * task_minutes);
    if remainder >= MIN_MICRO_TASK_MINUTES {
        let task_type = pick_task_type(goal, task_count as usize);
        queue.push_back(Task {
            id: ids.next_id(&allocation.exam_id),
            exam_id: allocation.exam_id.clone(),
            exam_name: exam_name.to_string(),
            task_type,
            label: format!("Quick {}", task_type.label().to_lowercase()),
            minutes: remainder,
            done: false,
        });
    }

    queue
}
