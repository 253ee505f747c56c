//! Readiness forecasting.
//!
//! A seeded, day-by-day stochastic simulation of exam readiness, optional
//! "what-if" overrides, and Monte Carlo aggregation to a median series.
//! Independent of the weekly planner: it consumes the same profile and exams
//! directly.

pub mod engine;
pub mod monte_carlo;
pub mod rng;
pub mod scenario;

pub use engine::{initial_readiness, step_readiness, ReadinessSimulator, SimulationConfig, SimulationRun};
pub use monte_carlo::{
    median, median_series, ExamSummary, MonteCarloAggregator, MonteCarloConfig,
    ScenarioComparison, SimulationResult,
};
pub use rng::{DeterministicRng, SimulationSeed};
pub use scenario::{redistribute_delta, ExamBoost, ScenarioInputs, ScenarioOverrides};
