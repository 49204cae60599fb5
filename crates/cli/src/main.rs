use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sra_catalog::{ActivityLevel, Catalog, PersonalFactors, Sex};
use sra_core::{PersonalFactorAnnotator, TriageService};

#[derive(Parser)]
#[command(name = "sra")]
#[command(about = "Symptom matching and recovery plan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all catalogued conditions
    List,
    /// Rank conditions against reported symptoms
    Match {
        /// Symptom descriptions, in your own words
        symptoms: Vec<String>,
        /// Age in years
        #[arg(long)]
        age: Option<u32>,
        /// Sex: male, female or other
        #[arg(long)]
        sex: Option<String>,
        /// Activity level: sedentary, light, moderate, very or athlete
        #[arg(long)]
        activity: Option<String>,
        /// Whether you smoke
        #[arg(long)]
        smoker: bool,
        /// Skip symptom alias expansion
        #[arg(long)]
        raw: bool,
    },
    /// Show one condition by id or name slug
    Show {
        /// Condition id or name slug
        identifier: String,
    },
    /// Print the staged recovery plan for a condition
    Plan {
        /// Condition id or name slug
        identifier: String,
    },
    /// Print generic recovery tasks for a condition stage
    Tasks {
        /// Condition id or name slug
        identifier: String,
        /// Stage number (1-4)
        #[arg(default_value_t = 1)]
        stage: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let catalog = match std::env::var("SRA_CATALOG_DIR").ok().map(PathBuf::from) {
        Some(dir) => Catalog::from_dir(&dir)?,
        None => Catalog::embedded()?,
    };
    let service = TriageService::with_annotator(Arc::new(catalog), PersonalFactorAnnotator);

    match cli.command {
        Some(Commands::List) => {
            for condition in service.catalog().conditions() {
                println!(
                    "{} [{}] {} - {}",
                    condition.id,
                    condition.urgency,
                    condition.name,
                    condition.category
                );
            }
        }
        Some(Commands::Match {
            symptoms,
            age,
            sex,
            activity,
            smoker,
            raw,
        }) => {
            if symptoms.is_empty() {
                eprintln!("No symptoms given; nothing to match.");
                return Ok(());
            }
            let factors = build_factors(age, sex.as_deref(), activity.as_deref(), smoker)?;
            let results = if raw {
                service.match_symptoms_raw(&symptoms, factors.as_ref())
            } else {
                service.match_symptoms(&symptoms, factors.as_ref())
            };
            if results.is_empty() {
                println!("No conditions matched the reported symptoms.");
            } else {
                for result in results {
                    println!(
                        "{:>4}  {} [{}] - {}",
                        result.match_percentage,
                        result.condition.name,
                        result.condition.urgency,
                        result.condition.description
                    );
                    for factor in &result.key_factors {
                        println!("      note: {}", factor);
                    }
                }
            }
        }
        Some(Commands::Show { identifier }) => match service.find_condition(identifier.as_str()) {
            Some(condition) => {
                println!("{} ({})", condition.name, condition.id);
                println!("Category: {}", condition.category);
                println!("Urgency: {}", condition.urgency);
                println!("Recovery time: {}", condition.recovery_time);
                println!("Symptoms: {}", condition.symptoms.join(", "));
                println!();
                println!("{}", condition.detailed_description);
                println!();
                println!("Treatment: {}", condition.treatment_summary);
                println!("See a doctor: {}", condition.when_to_see_doctor);
            }
            None => eprintln!("No condition found for identifier: {}", identifier),
        },
        Some(Commands::Plan { identifier }) => match service.recovery_plan(identifier.as_str()) {
            Some(plan) => {
                println!("Recovery plan for {}", plan.condition.name);
                if plan.stages.is_empty() {
                    println!(
                        "No staged plan authored; try `sra tasks {}` for generic tasks.",
                        plan.condition.id
                    );
                }
                for (number, stage) in plan.stages.iter().enumerate() {
                    println!();
                    println!("Stage {}: {} ({})", number + 1, stage.name, stage.timeframe);
                    println!("  {}", stage.description);
                    for milestone in &stage.milestones {
                        println!("  milestone: {}", milestone);
                    }
                    for warning in &stage.watch_out_for {
                        println!("  watch out: {}", warning);
                    }
                    for task in &stage.tasks {
                        println!(
                            "  [{}] {} - {} ({}, {})",
                            task.id, task.title, task.description, task.duration, task.frequency
                        );
                    }
                }
            }
            None => eprintln!("No condition found for identifier: {}", identifier),
        },
        Some(Commands::Tasks { identifier, stage }) => {
            let tasks = service.default_tasks(identifier.as_str(), stage);
            if tasks.is_empty() {
                eprintln!("No condition found for identifier: {}", identifier);
            } else {
                for task in tasks {
                    println!(
                        "[{}] {} - {} ({}, {})",
                        task.id, task.title, task.description, task.duration, task.frequency
                    );
                }
            }
        }
        None => {
            println!("Use --help to see available commands.");
        }
    }

    Ok(())
}

fn build_factors(
    age: Option<u32>,
    sex: Option<&str>,
    activity: Option<&str>,
    smoker: bool,
) -> Result<Option<PersonalFactors>, String> {
    if age.is_none() && sex.is_none() && activity.is_none() && !smoker {
        return Ok(None);
    }

    let sex = match sex {
        None => None,
        Some("male") => Some(Sex::Male),
        Some("female") => Some(Sex::Female),
        Some("other") => Some(Sex::Other),
        Some(other) => return Err(format!("unrecognised sex: {}", other)),
    };
    let activity_level = match activity {
        None => None,
        Some("sedentary") => Some(ActivityLevel::Sedentary),
        Some("light") => Some(ActivityLevel::Light),
        Some("moderate") => Some(ActivityLevel::Moderate),
        Some("very") => Some(ActivityLevel::Very),
        Some("athlete") => Some(ActivityLevel::Athlete),
        Some(other) => return Err(format!("unrecognised activity level: {}", other)),
    };

    Ok(Some(PersonalFactors {
        age,
        sex,
        activity_level,
        lifestyle: smoker.then(|| sra_catalog::Lifestyle {
            smoking: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }))
}
