//! Monte Carlo aggregation of readiness simulations.
//!
//! Runs the simulator once per seed and reduces the runs to a per-exam,
//! per-day median. Runs share no state, so they can execute on the rayon
//! pool; results are collected in run order before the reduction, which
//! keeps the output identical to a sequential execution.

use chrono::NaiveDate;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::engine::{ReadinessSimulator, SimulationConfig, SimulationRun};
use super::rng::SimulationSeed;
use super::scenario::{ScenarioInputs, ScenarioOverrides};
use crate::exam::{valid_exams, Exam};
use crate::profile::{GoalMode, Profile};

const MAX_RUNS: usize = 500;

/// Configuration for Monte Carlo aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of independent runs, clamped to [1, 500]
    #[serde(default = "default_runs")]
    pub runs: usize,
    /// Run `i` is seeded with `base_seed + i`
    #[serde(default)]
    pub base_seed: SimulationSeed,
    /// Execute runs on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_runs() -> usize {
    20
}
fn default_parallel() -> bool {
    true
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            base_seed: SimulationSeed::default(),
            parallel: default_parallel(),
        }
    }
}

impl MonteCarloConfig {
    pub fn run_count(&self) -> usize {
        self.runs.clamp(1, MAX_RUNS)
    }
}

/// Exam metadata carried alongside numeric series for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSummary {
    pub id: String,
    pub name: String,
    pub date: Option<NaiveDate>,
}

/// Aggregated forecast: per-exam median readiness for each simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub goal_mode: GoalMode,
    pub task_minutes: u32,
    pub runs: usize,
    pub dates: Vec<NaiveDate>,
    pub exams: Vec<ExamSummary>,
    pub median: IndexMap<String, Vec<f64>>,
}

impl SimulationResult {
    /// Median readiness on the last simulated day.
    pub fn final_readiness(&self, exam_id: &str) -> Option<f64> {
        self.median.get(exam_id).and_then(|s| s.last().copied())
    }
}

/// Baseline and scenario forecasts side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub overrides: ScenarioOverrides,
    pub baseline: SimulationResult,
    pub scenario: SimulationResult,
    /// Scenario minus baseline final readiness, for exams present in both
    pub final_delta: IndexMap<String, f64>,
}

/// Median of a set of values: middle value for odd counts, mean of the two
/// middle values for even counts. Empty input yields 0.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Reduce runs to a per-exam, per-day median across all runs.
///
/// Series are keyed as in the first run; every run is expected to cover the
/// same exams and dates.
pub fn median_series(runs: &[SimulationRun]) -> IndexMap<String, Vec<f64>> {
    let Some(first) = runs.first() else {
        return IndexMap::new();
    };

    first
        .series
        .iter()
        .map(|(exam_id, series)| {
            let per_day = (0..series.len())
                .map(|day| {
                    let values: Vec<f64> = runs
                        .iter()
                        .filter_map(|run| run.series.get(exam_id).and_then(|s| s.get(day)))
                        .copied()
                        .collect();
                    median(&values)
                })
                .collect();
            (exam_id.clone(), per_day)
        })
        .collect()
}

/// Monte Carlo driver around a [`ReadinessSimulator`].
#[derive(Debug, Clone, Default)]
pub struct MonteCarloAggregator {
    simulator: ReadinessSimulator,
    config: MonteCarloConfig,
}

impl MonteCarloAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(simulation: SimulationConfig, config: MonteCarloConfig) -> Self {
        Self {
            simulator: ReadinessSimulator::with_config(simulation),
            config,
        }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Execute every run for the derived inputs, in run order.
    pub fn run_all(&self, inputs: &ScenarioInputs, start: NaiveDate) -> Vec<SimulationRun> {
        let count = self.config.run_count();
        let base = self.config.base_seed;

        if self.config.parallel {
            (0..count)
                .into_par_iter()
                .map(|i| self.simulator.run(inputs, start, base.offset(i as u64)))
                .collect()
        } else {
            (0..count)
                .map(|i| self.simulator.run(inputs, start, base.offset(i as u64)))
                .collect()
        }
    }

    /// Median forecast for one scenario.
    pub fn aggregate(
        &self,
        profile: &Profile,
        exams: &[Exam],
        start: NaiveDate,
        overrides: &ScenarioOverrides,
    ) -> SimulationResult {
        let inputs = overrides.apply(profile, &valid_exams(exams));
        let runs = self.run_all(&inputs, start);
        let dates = runs.first().map(|r| r.dates.clone()).unwrap_or_default();
        let median = median_series(&runs);

        tracing::debug!(
            runs = runs.len(),
            exams = median.len(),
            parallel = self.config.parallel,
            "aggregated monte carlo runs"
        );

        SimulationResult {
            goal_mode: inputs.profile.goal_mode,
            task_minutes: inputs.profile.clamped_task_minutes(),
            runs: runs.len(),
            dates,
            exams: inputs
                .exams
                .iter()
                .map(|e| ExamSummary {
                    id: e.id.clone(),
                    name: e.name.clone(),
                    date: e.date,
                })
                .collect(),
            median,
        }
    }

    /// Baseline vs. scenario forecasts over the same seeds.
    pub fn compare(
        &self,
        profile: &Profile,
        exams: &[Exam],
        start: NaiveDate,
        overrides: &ScenarioOverrides,
    ) -> ScenarioComparison {
        let baseline = self.aggregate(profile, exams, start, &ScenarioOverrides::baseline());
        let scenario = self.aggregate(profile, exams, start, overrides);

        let final_delta = scenario
            .median
            .keys()
            .filter_map(|id| {
                let after = scenario.final_readiness(id)?;
                let before = baseline.final_readiness(id)?;
                Some((id.clone(), after - before))
            })
            .collect();

        ScenarioComparison {
            overrides: overrides.clone(),
            baseline,
            scenario,
            final_delta,
        }
    }
}
