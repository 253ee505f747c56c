//! Day-by-day readiness simulator.
//!
//! Each exam carries a readiness state in [0, 100], initialized from its
//! mastery level. Every simulated day splits that weekday's capacity across
//! exams by their simulator weight, then decays, grows, penalizes and
//! perturbs each state.

use chrono::{Datelike, Duration, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::rng::{DeterministicRng, SimulationSeed};
use super::scenario::{ScenarioInputs, ScenarioOverrides};
use crate::exam::{valid_exams, Exam};
use crate::planner::weight::{normalize, simulator_weight, URGENCY_BOOST_RANGE};
use crate::profile::{Profile, Weekday};

/// Readiness gain per hour of study at zero readiness.
const GAIN_PER_HOUR: f64 = 14.0;
/// Readiness level at which the gain vanishes.
const GAIN_SATURATION: f64 = 110.0;
/// Unstudied days closer than this to an exam cost readiness.
const PROXIMITY_WINDOW_DAYS: i64 = 14;
const PROXIMITY_PENALTY: f64 = 2.0;
const NOISE_SCALE: f64 = 6.0;

/// Tunable simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of simulated days, clamped to [7, 365]
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Exponent on the urgency term, clamped to [0.5, 4.0]
    #[serde(default = "default_urgency_boost")]
    pub urgency_boost: f64,
    /// Daily forgetting rate, clamped to [0, 0.03]
    #[serde(default = "default_decay")]
    pub decay: f64,
    /// Noise amplitude, clamped to [0, 0.5]
    #[serde(default = "default_noise")]
    pub noise: f64,
}

fn default_horizon_days() -> u32 {
    42
}
fn default_urgency_boost() -> f64 {
    1.5
}
fn default_decay() -> f64 {
    0.012
}
fn default_noise() -> f64 {
    0.2
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            urgency_boost: default_urgency_boost(),
            decay: default_decay(),
            noise: default_noise(),
        }
    }
}

fn clamp_finite(value: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}

impl SimulationConfig {
    pub fn horizon(&self) -> u32 {
        self.horizon_days.clamp(7, 365)
    }

    pub fn urgency_boost(&self) -> f64 {
        clamp_finite(
            self.urgency_boost,
            URGENCY_BOOST_RANGE.0,
            URGENCY_BOOST_RANGE.1,
            default_urgency_boost(),
        )
    }

    pub fn decay(&self) -> f64 {
        clamp_finite(self.decay, 0.0, 0.03, 0.0)
    }

    pub fn noise(&self) -> f64 {
        clamp_finite(self.noise, 0.0, 0.5, 0.0)
    }
}

/// One simulated trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub seed: SimulationSeed,
    pub dates: Vec<NaiveDate>,
    /// Readiness per exam id, one value per date
    pub series: IndexMap<String, Vec<f64>>,
}

/// Starting readiness for a mastery level: `level / 5 * 100`.
pub fn initial_readiness(exam: &Exam) -> f64 {
    exam.clamped_level() as f64 / 5.0 * 100.0
}

/// Advance one exam's readiness by one day.
///
/// `noise_draw` is a uniform value in [-1, 1).
pub fn step_readiness(
    readiness: f64,
    allocated_min: u32,
    days_left: i64,
    decay: f64,
    noise: f64,
    noise_draw: f64,
) -> f64 {
    let mut r = readiness * (1.0 - decay);
    r += (allocated_min as f64 / 60.0) * GAIN_PER_HOUR * (1.0 - r / GAIN_SATURATION);
    if allocated_min == 0 && days_left <= PROXIMITY_WINDOW_DAYS {
        r -= ((PROXIMITY_WINDOW_DAYS - days_left) as f64 / PROXIMITY_WINDOW_DAYS as f64)
            * PROXIMITY_PENALTY;
    }
    r += noise_draw * noise * NOISE_SCALE;
    r.clamp(0.0, 100.0)
}

/// Stochastic readiness simulator.
#[derive(Debug, Clone, Default)]
pub struct ReadinessSimulator {
    config: SimulationConfig,
}

impl ReadinessSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate from `start` with the given overrides and seed.
    ///
    /// Invalid exams are dropped first; the inputs themselves are never
    /// modified.
    pub fn simulate(
        &self,
        profile: &Profile,
        exams: &[Exam],
        start: NaiveDate,
        overrides: &ScenarioOverrides,
        seed: SimulationSeed,
    ) -> SimulationRun {
        let inputs = overrides.apply(profile, &valid_exams(exams));
        self.run(&inputs, start, seed)
    }

    /// Simulate already-derived scenario inputs.
    pub fn run(&self, inputs: &ScenarioInputs, start: NaiveDate, seed: SimulationSeed) -> SimulationRun {
        let horizon = self.config.horizon() as usize;
        let boost = self.config.urgency_boost();
        let decay = self.config.decay();
        let noise = self.config.noise();

        let mut rng = DeterministicRng::new(seed);
        let mut state: Vec<f64> = inputs.exams.iter().map(initial_readiness).collect();
        let mut tracks: Vec<Vec<f64>> = vec![Vec::with_capacity(horizon); inputs.exams.len()];
        let mut dates = Vec::with_capacity(horizon);

        for t in 0..horizon {
            let date = start + Duration::days(t as i64);
            let capacity = inputs.profile.capacity_for(Weekday::from(date.weekday()));

            let weights: Vec<f64> = inputs
                .exams
                .iter()
                .map(|exam| {
                    let w = simulator_weight(exam, date, boost);
                    match &inputs.boost {
                        Some(b) if b.exam_id == exam.id => w * b.factor,
                        _ => w,
                    }
                })
                .collect();
            let fractions = normalize(&weights);

            for (i, exam) in inputs.exams.iter().enumerate() {
                let allocated = (capacity as f64 * fractions[i]).floor() as u32;
                let draw = rng.next_signed();
                state[i] = step_readiness(
                    state[i],
                    allocated,
                    exam.days_until(date),
                    decay,
                    noise,
                    draw,
                );
                tracks[i].push(state[i]);
            }
            dates.push(date);
        }

        let series: IndexMap<String, Vec<f64>> = inputs
            .exams
            .iter()
            .map(|e| e.id.clone())
            .zip(tracks)
            .collect();

        tracing::debug!(seed = seed.0, exams = series.len(), days = horizon, "simulation run finished");

        SimulationRun {
            seed,
            dates,
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DayMinutes;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn exams() -> Vec<Exam> {
        vec![
            Exam::new("near", "Near", start() + Duration::days(10)).with_level(1),
            Exam::new("far", "Far", start() + Duration::days(80)).with_level(3),
        ]
    }

    #[test]
    fn initial_readiness_follows_level() {
        assert_eq!(initial_readiness(&exams()[0]), 20.0);
        assert_eq!(initial_readiness(&exams()[1].clone().with_level(9)), 100.0);
    }

    #[test]
    fn step_applies_decay_gain_and_penalty() {
        // 60 minutes from zero: 14 * (1 - 0/110)
        assert!((step_readiness(0.0, 60, 30, 0.0, 0.0, 0.0) - 14.0).abs() < 1e-12);
        // decay only
        assert!((step_readiness(50.0, 0, 30, 0.02, 0.0, 0.0) - 49.0).abs() < 1e-12);
        // unstudied, 7 days out: penalty of 1
        assert!((step_readiness(50.0, 0, 7, 0.0, 0.0, 0.0) - 49.0).abs() < 1e-12);
        // noise at full amplitude moves by at most 3
        assert!((step_readiness(50.0, 0, 30, 0.0, 0.5, 1.0) - 53.0).abs() < 1e-12);
    }

    #[test]
    fn step_is_clamped() {
        assert_eq!(step_readiness(99.0, 1440, 0, 0.0, 0.5, 0.99), 100.0);
        assert_eq!(step_readiness(0.5, 0, 0, 0.03, 0.5, -1.0), 0.0);
    }

    #[test]
    fn same_seed_reproduces_trajectory() {
        let sim = ReadinessSimulator::new();
        let overrides = ScenarioOverrides::baseline();
        let a = sim.simulate(&Profile::default(), &exams(), start(), &overrides, SimulationSeed::new(7));
        let b = sim.simulate(&Profile::default(), &exams(), start(), &overrides, SimulationSeed::new(7));
        assert_eq!(a, b);

        let c = sim.simulate(&Profile::default(), &exams(), start(), &overrides, SimulationSeed::new(8));
        assert_ne!(a.series, c.series);
    }

    #[test]
    fn horizon_is_clamped() {
        let sim = ReadinessSimulator::with_config(SimulationConfig {
            horizon_days: 2,
            ..SimulationConfig::default()
        });
        let run = sim.simulate(
            &Profile::default(),
            &exams(),
            start(),
            &ScenarioOverrides::baseline(),
            SimulationSeed::default(),
        );
        assert_eq!(run.dates.len(), 7);
        assert!(run.series.values().all(|s| s.len() == 7));
        assert_eq!(run.dates[0], start());
    }

    #[test]
    fn studying_raises_readiness_without_noise() {
        let profile = Profile {
            day_minutes: DayMinutes::uniform(120),
            ..Profile::default()
        };
        let sim = ReadinessSimulator::with_config(SimulationConfig {
            noise: 0.0,
            decay: 0.0,
            ..SimulationConfig::default()
        });
        let run = sim.simulate(
            &profile,
            &exams(),
            start(),
            &ScenarioOverrides::baseline(),
            SimulationSeed::default(),
        );
        let near = &run.series["near"];
        assert!(near[6] > 20.0);
        assert!(near.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn no_capacity_means_no_progress() {
        let profile = Profile {
            day_minutes: DayMinutes::default(),
            ..Profile::default()
        };
        let sim = ReadinessSimulator::with_config(SimulationConfig {
            noise: 0.0,
            decay: 0.0,
            ..SimulationConfig::default()
        });
        let run = sim.simulate(
            &profile,
            &exams(),
            start(),
            &ScenarioOverrides::baseline(),
            SimulationSeed::default(),
        );
        // far exam: no study, outside the proximity window for the whole horizon
        assert!(run.series["far"].iter().all(|r| *r == 60.0));
        // near exam: penalties pull it down as the date approaches
        assert!(run.series["near"].last().copied().unwrap() < 20.0);
    }

    #[test]
    fn dropped_exam_is_not_simulated() {
        let run = ReadinessSimulator::new().simulate(
            &Profile::default(),
            &exams(),
            start(),
            &ScenarioOverrides::baseline().dropping("far"),
            SimulationSeed::default(),
        );
        assert_eq!(run.series.keys().collect::<Vec<_>>(), vec!["near"]);
    }
}
