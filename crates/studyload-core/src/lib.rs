//! # Studyload Core Library
//!
//! Core logic for the Studyload exam-preparation planner. Everything here is
//! pure computation over caller-owned data: a study [`Profile`] and a list of
//! [`Exam`]s go in, plans and forecasts come out. The `studyload` CLI is a
//! thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Planner**: scores exams, splits the weekly minute budget and packs
//!   template-driven tasks into Mon..Sun
//! - **Readiness**: single-week display estimate and badge per exam
//! - **Simulation**: seeded day-by-day readiness forecast, what-if
//!   overrides and Monte Carlo median aggregation
//! - **Storage**: TOML configuration and TOML/JSON input files
//!
//! ## Key Components
//!
//! - [`WeeklyPlanner`]: weekly plan builder
//! - [`MonteCarloAggregator`]: forecast driver
//! - [`Config`]: configuration management

pub mod error;
pub mod exam;
pub mod planner;
pub mod profile;
pub mod readiness;
pub mod simulation;
pub mod storage;

pub use error::{ConfigError, CoreError, InputError};
pub use exam::Exam;
pub use planner::{build_weekly_plan, Day, Task, TaskType, WeeklyPlan, WeeklyPlanner};
pub use profile::{DayMinutes, GoalMode, Profile, Weekday};
pub use readiness::{estimate_plan_readiness, ReadinessBadge, ReadinessEstimate};
pub use simulation::{
    MonteCarloAggregator, MonteCarloConfig, ReadinessSimulator, ScenarioComparison,
    ScenarioOverrides, SimulationConfig, SimulationResult, SimulationSeed,
};
pub use storage::{Config, StudyInput};
