use clap::Args;
use studyload_core::{build_weekly_plan, estimate_plan_readiness};

use super::InputArgs;

#[derive(Args)]
pub struct ReadinessArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ReadinessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = args.input.load()?;
    let plan = build_weekly_plan(&loaded.profile, &loaded.exams, loaded.today);
    let estimates = estimate_plan_readiness(&plan, &loaded.profile, &loaded.exams, loaded.today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimates)?);
        return Ok(());
    }

    if estimates.is_empty() {
        println!("No exams.");
        return Ok(());
    }

    for est in &estimates {
        println!(
            "{:<28} {:>5.1}%  {:<10}  (needs {:.0} min, {:.0} available, {} this week)",
            est.exam_name,
            est.percent,
            est.badge.label(),
            est.required_min,
            est.capacity_min,
            est.week_min
        );
    }
    Ok(())
}
