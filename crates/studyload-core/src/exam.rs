//! Exam records and the clamped quantities the engine derives from them.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upper bound on the distance to an exam, in days.
pub const MAX_DAYS_TO_EXAM: i64 = 3650;

/// An upcoming exam.
///
/// `name` and `date` are required for the exam to take part in planning;
/// records missing either are dropped by [`valid_exams`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Credit load
    #[serde(default = "default_cfu")]
    pub cfu: i32,
    /// 1 (easy) to 3 (hard)
    #[serde(default = "default_difficulty")]
    pub difficulty: i32,
    /// Current mastery, 0 (none) to 5 (full)
    #[serde(default)]
    pub level: i32,
}

fn default_cfu() -> i32 {
    6
}
fn default_difficulty() -> i32 {
    2
}

impl Exam {
    pub fn new(id: impl Into<String>, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: Some(date),
            cfu: default_cfu(),
            difficulty: default_difficulty(),
            level: 0,
        }
    }

    pub fn with_cfu(mut self, cfu: i32) -> Self {
        self.cfu = cfu;
        self
    }

    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Structurally usable: has a non-blank name and a date.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.date.is_some()
    }

    pub fn clamped_cfu(&self) -> i32 {
        self.cfu.clamp(1, 30)
    }

    pub fn clamped_difficulty(&self) -> i32 {
        self.difficulty.clamp(1, 3)
    }

    pub fn clamped_level(&self) -> i32 {
        self.level.clamp(0, 5)
    }

    /// Whole days from `today` until the exam, clamped to [0, 3650].
    ///
    /// An exam without a date counts as far away.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        match self.date {
            Some(date) => (date - today).num_days().clamp(0, MAX_DAYS_TO_EXAM),
            None => MAX_DAYS_TO_EXAM,
        }
    }
}

/// Drop structurally invalid exams, preserving input order.
///
/// Ids key plans and readiness series, so every kept exam leaves with a
/// unique non-blank id: a blank id becomes `exam-<position>` and a repeated
/// one gets a `-<n>` suffix. Already unique ids pass through untouched.
pub fn valid_exams(exams: &[Exam]) -> Vec<Exam> {
    let mut valid: Vec<Exam> = exams.iter().filter(|e| e.is_valid()).cloned().collect();
    let dropped = exams.len() - valid.len();
    if dropped > 0 {
        tracing::warn!(dropped, "ignoring exams without a name or date");
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(valid.len());
    for (position, exam) in valid.iter_mut().enumerate() {
        let base = if exam.id.trim().is_empty() {
            format!("exam-{}", position + 1)
        } else {
            exam.id.clone()
        };
        let mut id = base.clone();
        let mut n = 2;
        while seen.contains(&id) {
            id = format!("{base}-{n}");
            n += 1;
        }
        if id != exam.id {
            tracing::warn!(name = %exam.name, from = %exam.id, to = %id, "exam id is blank or repeated; renaming");
            exam.id = id.clone();
        }
        seen.insert(id);
    }
    valid
}
