use clap::Args;
use studyload_core::build_weekly_plan;

use super::InputArgs;

#[derive(Args)]
pub struct TodayArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TodayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = args.input.load()?;
    let plan = build_weekly_plan(&loaded.profile, &loaded.exams, loaded.today);
    let tasks = plan.tasks_for(loaded.today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("Nothing planned for {}.", loaded.today);
        return Ok(());
    }

    let total: u32 = tasks.iter().map(|t| t.minutes).sum();
    println!("{} ({} min)", loaded.today, total);
    for task in tasks {
        println!("  [ ] {}: {} ({} min)", task.exam_name, task.label, task.minutes);
    }
    Ok(())
}
