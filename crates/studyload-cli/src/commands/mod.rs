pub mod completions;
pub mod config;
pub mod plan;
pub mod readiness;
pub mod simulate;
pub mod today;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use studyload_core::{Config, Exam, Profile, StudyInput};

/// Arguments shared by every command that reads an input file.
#[derive(Args)]
pub struct InputArgs {
    /// Profile and exams file (.toml or .json)
    #[arg(short, long)]
    pub input: PathBuf,
    /// Reference date (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Everything a command needs after reading config and input.
pub struct Loaded {
    pub config: Config,
    pub profile: Profile,
    pub exams: Vec<Exam>,
    pub today: NaiveDate,
}

impl InputArgs {
    pub fn load(&self) -> Result<Loaded, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let input = StudyInput::load(&self.input)?;
        let profile = input.resolve_profile(&config);
        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        Ok(Loaded {
            config,
            profile,
            exams: input.exams,
            today,
        })
    }
}
