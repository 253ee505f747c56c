use std::collections::HashMap;

use clap::Args;
use studyload_core::{Exam, WeeklyPlan, WeeklyPlanner};

use super::InputArgs;

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = args.input.load()?;
    let plan = WeeklyPlanner::new().build(&loaded.profile, &loaded.exams, loaded.today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan, &loaded.exams);
    }
    Ok(())
}

fn print_plan(plan: &WeeklyPlan, exams: &[Exam]) {
    let names: HashMap<&str, &str> = exams
        .iter()
        .map(|e| (e.id.as_str(), e.name.as_str()))
        .collect();

    println!(
        "Week of {} ({} min budget, {} min tasks)",
        plan.week_start, plan.weekly_budget_min, plan.task_minutes
    );

    if plan.allocations.is_empty() {
        println!("No exams to plan.");
        return;
    }

    println!();
    println!("Allocation:");
    for alloc in &plan.allocations {
        let name = names.get(alloc.exam_id.as_str()).copied().unwrap_or("?");
        println!(
            "  {:<28} {:>5} min  ({} planned)",
            name,
            alloc.target_min,
            plan.planned_minutes(&alloc.exam_id)
        );
    }

    for day in &plan.days {
        println!();
        println!(
            "{} {}  {}/{} min",
            day.label,
            day.date,
            day.planned_minutes(),
            day.capacity_min
        );
        for task in &day.tasks {
            println!("  - {}: {} ({} min)", task.exam_name, task.label, task.minutes);
        }
    }

    if plan.has_shortfall() {
        println!();
        println!(
            "Cut: {} tasks ({} min) do not fit this week",
            plan.cut.len(),
            plan.cut_minutes()
        );
        for task in &plan.cut {
            println!("  - {}: {} ({} min)", task.exam_name, task.label, task.minutes);
        }
    }
}
