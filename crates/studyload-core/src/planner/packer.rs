//! Daily packing of task queues into a week.
//!
//! Days are filled one at a time. For each placement the exams are scanned
//! in priority order and the first queue whose head fits the remaining
//! capacity gives up that task; the scan then restarts from the top. This
//! interleaves exams on a day while favouring high-priority ones when
//! capacity is tight.

use std::collections::VecDeque;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::queue::Task;
use crate::profile::{Profile, Weekday};

/// A day stops accepting tasks once less than this many minutes remain.
pub const MIN_PACKABLE_MINUTES: u32 = 15;

/// Upper bound on placements per day.
pub const MAX_PLACEMENTS_PER_DAY: usize = 512;

/// One calendar day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub key: String,
    pub label: String,
    pub date: NaiveDate,
    pub capacity_min: u32,
    pub tasks: Vec<Task>,
}

impl Day {
    pub fn new(weekday: Weekday, date: NaiveDate, capacity_min: u32) -> Self {
        Self {
            key: weekday.key().to_string(),
            label: weekday.label().to_string(),
            date,
            capacity_min,
            tasks: Vec::new(),
        }
    }

    /// Minutes already assigned to this day.
    pub fn planned_minutes(&self) -> u32 {
        self.tasks.iter().map(|t| t.minutes).sum()
    }

    pub fn free_minutes(&self) -> u32 {
        self.capacity_min.saturating_sub(self.planned_minutes())
    }
}

/// Empty Mon..Sun shells for the week starting at `week_start`.
pub fn week_shells(profile: &Profile, week_start: NaiveDate) -> Vec<Day> {
    Weekday::ALL
        .iter()
        .enumerate()
        .map(|(offset, weekday)| {
            Day::new(
                *weekday,
                week_start + Duration::days(offset as i64),
                profile.capacity_for(*weekday),
            )
        })
        .collect()
}

/// Fill `days` from the priority-ordered `queues`.
///
/// Returns every task left in any queue afterwards, in priority order.
pub fn pack_days(days: &mut [Day], queues: &mut [VecDeque<Task>]) -> Vec<Task> {
    for day in days.iter_mut() {
        let mut remaining = day.capacity_min;
        let mut placements = 0;

        while remaining >= MIN_PACKABLE_MINUTES && placements < MAX_PLACEMENTS_PER_DAY {
            let slot = queues.iter().position(|q| {
                q.front()
                    .map(|task| task.minutes <= remaining)
                    .unwrap_or(false)
            });

            let Some(slot) = slot else {
                break;
            };
            let Some(task) = queues[slot].pop_front() else {
                break;
            };

            remaining -= task.minutes;
            day.tasks.push(task);
            placements += 1;
        }

        tracing::debug!(
            day = %day.key,
            placed = day.tasks.len(),
            free = remaining,
            "packed day"
        );
    }

    let cut: Vec<Task> = queues.iter_mut().flat_map(|q| q.drain(..)).collect();
    if !cut.is_empty() {
        tracing::warn!(
            cut = cut.len(),
            minutes = cut.iter().map(|t| t.minutes).sum::<u32>(),
            "weekly capacity cannot hold every task"
        );
    }
    cut
}
