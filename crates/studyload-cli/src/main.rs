use clap::{Parser, Subcommand};

mod commands;
mod telemetry;

#[derive(Parser)]
#[command(name = "studyload", version, about = "Weekly study planner and readiness forecaster")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the weekly plan for the week containing --today
    Plan(commands::plan::PlanArgs),
    /// Tasks planned for a single day
    Today(commands::today::TodayArgs),
    /// Readiness estimate and badge per exam
    Readiness(commands::readiness::ReadinessArgs),
    /// Forecast readiness, optionally against a what-if scenario
    Simulate(commands::simulate::SimulateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    telemetry::init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Today(args) => commands::today::run(args),
        Commands::Readiness(args) => commands::readiness::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
