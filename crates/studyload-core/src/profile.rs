//! Study profile: goal mode, weekly time budget and per-weekday availability.
//!
//! The profile is owned by the caller. The engine only reads it; scenario
//! overrides build a derived copy (see [`crate::simulation::ScenarioOverrides`]).

use serde::{Deserialize, Serialize};

/// Minimum atomic task length in minutes.
pub const MIN_TASK_MINUTES: u32 = 15;
/// Maximum atomic task length in minutes.
pub const MAX_TASK_MINUTES: u32 = 120;

/// Hours in a calendar week; the upper bound on the weekly budget.
pub const MAX_WEEKLY_HOURS: f64 = 7.0 * 24.0;
/// Minutes in a day; the upper bound on any weekday's capacity.
pub const MAX_DAY_MINUTES: u32 = 24 * 60;

/// How aggressively the user wants to prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalMode {
    /// Minimum viable preparation
    Pass,
    /// Balanced preparation
    #[default]
    Good,
    /// Maximal preparation
    Top,
}

impl GoalMode {
    /// Goal factor used by the weekly planner's weight model.
    pub fn planner_factor(&self) -> f64 {
        match self {
            GoalMode::Pass => 0.85,
            GoalMode::Good => 1.0,
            GoalMode::Top => 1.25,
        }
    }

    /// Goal factor used by the display readiness estimator.
    ///
    /// Deliberately distinct from [`GoalMode::planner_factor`]: the two
    /// calibrate different outputs.
    pub fn requirement_factor(&self) -> f64 {
        match self {
            GoalMode::Pass => 0.85,
            GoalMode::Good => 1.0,
            GoalMode::Top => 1.15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalMode::Pass => "pass",
            GoalMode::Good => "good",
            GoalMode::Top => "top",
        }
    }
}

impl std::str::FromStr for GoalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pass" => Ok(GoalMode::Pass),
            "good" => Ok(GoalMode::Good),
            "top" => Ok(GoalMode::Top),
            other => Err(format!("unknown goal mode '{other}' (expected pass, good or top)")),
        }
    }
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All weekdays in plan order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Monday through Saturday, the days adjusted by `delta_hours` overrides.
    pub const WORKDAYS: [Weekday; 6] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    /// Short key, e.g. `"mon"`.
    pub fn key(&self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }

    /// Human-readable name, e.g. `"Monday"`.
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

/// Available study minutes for each weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayMinutes {
    #[serde(default)]
    pub mon: u32,
    #[serde(default)]
    pub tue: u32,
    #[serde(default)]
    pub wed: u32,
    #[serde(default)]
    pub thu: u32,
    #[serde(default)]
    pub fri: u32,
    #[serde(default)]
    pub sat: u32,
    #[serde(default)]
    pub sun: u32,
}

impl DayMinutes {
    /// Same availability on every day.
    pub fn uniform(minutes: u32) -> Self {
        Self {
            mon: minutes,
            tue: minutes,
            wed: minutes,
            thu: minutes,
            fri: minutes,
            sat: minutes,
            sun: minutes,
        }
    }

    /// Minutes available on `day`, clamped to a single day's length.
    pub fn get(&self, day: Weekday) -> u32 {
        let raw = match day {
            Weekday::Mon => self.mon,
            Weekday::Tue => self.tue,
            Weekday::Wed => self.wed,
            Weekday::Thu => self.thu,
            Weekday::Fri => self.fri,
            Weekday::Sat => self.sat,
            Weekday::Sun => self.sun,
        };
        raw.min(MAX_DAY_MINUTES)
    }

    pub fn set(&mut self, day: Weekday, minutes: u32) {
        let slot = match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        };
        *slot = minutes.min(MAX_DAY_MINUTES);
    }

    /// Sum over the whole week.
    pub fn total(&self) -> u32 {
        Weekday::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// Average minutes per calendar day.
    pub fn daily_average(&self) -> f64 {
        self.total() as f64 / 7.0
    }
}

/// A user's study profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub goal_mode: GoalMode,
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: f64,
    #[serde(default = "default_task_minutes")]
    pub task_minutes: u32,
    #[serde(default = "default_day_minutes")]
    pub day_minutes: DayMinutes,
}

fn default_weekly_hours() -> f64 {
    14.0
}
fn default_task_minutes() -> u32 {
    35
}
fn default_day_minutes() -> DayMinutes {
    DayMinutes {
        mon: 120,
        tue: 120,
        wed: 120,
        thu: 120,
        fri: 120,
        sat: 180,
        sun: 0,
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            goal_mode: GoalMode::default(),
            weekly_hours: default_weekly_hours(),
            task_minutes: default_task_minutes(),
            day_minutes: default_day_minutes(),
        }
    }
}

impl Profile {
    /// Weekly hours clamped to [0, 168]. Non-finite values count as no
    /// study time.
    pub fn clamped_weekly_hours(&self) -> f64 {
        if self.weekly_hours.is_finite() {
            self.weekly_hours.clamp(0.0, MAX_WEEKLY_HOURS)
        } else {
            0.0
        }
    }

    /// Weekly study budget in whole minutes.
    pub fn weekly_budget_min(&self) -> u32 {
        (self.clamped_weekly_hours() * 60.0).round() as u32
    }

    /// Atomic task length clamped to [15, 120].
    pub fn clamped_task_minutes(&self) -> u32 {
        self.task_minutes.clamp(MIN_TASK_MINUTES, MAX_TASK_MINUTES)
    }

    /// Capacity for a given weekday.
    pub fn capacity_for(&self, day: Weekday) -> u32 {
        self.day_minutes.get(day)
    }
}
