use clap::Args;
use studyload_core::{
    GoalMode, MonteCarloAggregator, ReadinessSimulator, ScenarioOverrides, SimulationSeed,
};

use super::InputArgs;

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Number of Monte Carlo runs (overrides config)
    #[arg(long)]
    pub runs: Option<usize>,
    /// Base seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Simulated days (overrides config)
    #[arg(long)]
    pub horizon: Option<u32>,
    /// Extra weekly hours spread over Mon..Sat (negative to remove)
    #[arg(long, allow_hyphen_values = true)]
    pub delta_hours: Option<f64>,
    /// Goal mode for the scenario (pass, good, top)
    #[arg(long)]
    pub goal: Option<GoalMode>,
    /// Task length for the scenario
    #[arg(long)]
    pub task_minutes: Option<u32>,
    /// Exam id to leave out of the scenario
    #[arg(long)]
    pub drop: Option<String>,
    /// Exam id to prioritize in the scenario
    #[arg(long)]
    pub boost: Option<String>,
    /// Weight multiplier for --boost
    #[arg(long, requires = "boost")]
    pub boost_factor: Option<f64>,
    /// Single seeded run instead of a Monte Carlo median
    #[arg(long)]
    pub single: bool,
}

impl SimulateArgs {
    fn overrides(&self) -> ScenarioOverrides {
        ScenarioOverrides {
            delta_hours: self.delta_hours,
            goal_mode: self.goal,
            task_minutes: self.task_minutes,
            drop_exam_id: self.drop.clone(),
            boost_exam_id: self.boost.clone(),
            boost_factor: self.boost_factor,
        }
    }
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = args.input.load()?;

    let mut simulation = loaded.config.simulation.clone();
    if let Some(horizon) = args.horizon {
        simulation.horizon_days = horizon;
    }
    let mut monte_carlo = loaded.config.monte_carlo.clone();
    if let Some(runs) = args.runs {
        monte_carlo.runs = runs;
    }
    if let Some(seed) = args.seed {
        monte_carlo.base_seed = SimulationSeed::new(seed);
    }

    let overrides = args.overrides();
    for id in [&overrides.drop_exam_id, &overrides.boost_exam_id].into_iter().flatten() {
        if !loaded.exams.iter().any(|e| &e.id == id) {
            tracing::warn!(exam_id = %id, "override names an exam that is not in the input");
        }
    }

    if args.single {
        let run = ReadinessSimulator::with_config(simulation).simulate(
            &loaded.profile,
            &loaded.exams,
            loaded.today,
            &overrides,
            monte_carlo.base_seed,
        );
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(());
    }

    let aggregator = MonteCarloAggregator::with_config(simulation, monte_carlo);
    if overrides.is_baseline() {
        let result = aggregator.aggregate(&loaded.profile, &loaded.exams, loaded.today, &overrides);
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let comparison =
            aggregator.compare(&loaded.profile, &loaded.exams, loaded.today, &overrides);
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    }
    Ok(())
}
