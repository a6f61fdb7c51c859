//! `timeline` CLI -- sprint bounds, validation and timeline ranges for a project document.
//!
//! The project document is JSON: a project with its sprints, dates as `YYYY-MM-DD`.
//!
//! ## Usage
//!
//! ```sh
//! # Timeline segments for a project (stdin → stdout)
//! cat project.json | timeline ranges
//!
//! # Legal start/end windows for sprint 3
//! timeline bounds -i project.json --sprint 3
//!
//! # Start window for a new sprint whose end is already chosen
//! timeline bounds -i project.json --end 2022-05-01
//!
//! # Project start/end windows, pretending today is 2022-01-15
//! timeline --today 2022-01-15 bounds -i project.json --project
//!
//! # Default dates for the next sprint
//! timeline defaults -i project.json
//!
//! # Validate the whole project, or one sprint against its siblings
//! timeline validate -i project.json
//! timeline validate -i project.json --sprint 3
//!
//! # Remove a sprint and relabel the rest
//! timeline remove -i project.json --sprint 2 -o project.json
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::io::{self, Read};
use std::process;
use timeline_engine::{
    check_room_for_sprint, compute_ranges, default_sprint_dates, project_end_bounds_at,
    project_start_bounds_at, remove_sprint, sprint_end_bounds, sprint_start_bounds, time,
    validate_project_at, validate_sprint, ErrorSink, Project, ProjectDraft, SprintDraft,
};

#[derive(Parser)]
#[command(
    name = "timeline",
    version,
    about = "Sprint bounds, validation and timeline ranges for a project"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v, -vv, -vvv); logs go to stderr
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Treat this date as today (YYYY-MM-DD) instead of reading the clock
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split the project into ordered sprint and between-sprint ranges
    Ranges {
        /// Input project file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show the legal date windows for a sprint or the project
    Bounds {
        /// Input project file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Existing sprint to edit; omit for a new sprint
        #[arg(long, conflicts_with = "project")]
        sprint: Option<u32>,
        /// Already chosen end date; caps the start window one day before it
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Show the project's own start and end windows
        #[arg(long)]
        project: bool,
    },
    /// Propose start and end dates for the next sprint
    Defaults {
        /// Input project file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Validate the project, or one of its sprints against the others
    Validate {
        /// Input project file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Sprint to validate; omit to validate the project
        #[arg(long)]
        sprint: Option<u32>,
    },
    /// Remove a sprint and relabel the remaining ones
    Remove {
        /// Input project file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Sprint to remove
        #[arg(long)]
        sprint: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let today = cli.today.unwrap_or_else(time::today);

    match cli.command {
        Commands::Ranges { input, output } => {
            let project = read_project(input.as_deref())?;
            let ranges = compute_ranges(&project, &project.sprints);
            write_output(output.as_deref(), &to_json(&ranges)?)?;
        }
        Commands::Bounds {
            input,
            sprint,
            end,
            project: project_bounds,
        } => {
            let project = read_project(input.as_deref())?;

            let report = if project_bounds {
                json!({
                    "start": project_start_bounds_at(&project, today),
                    "end": project_end_bounds_at(&project, today),
                })
            } else if let Some(id) = sprint {
                let target = project
                    .sprint(id)
                    .with_context(|| format!("Sprint {} not found in project {}", id, project.id))?;
                let siblings = project.siblings_of(id);
                let mut start = sprint_start_bounds(&project, &siblings, Some(target));
                if let Some(end) = end {
                    start = start.cap_before_end(end);
                }
                json!({
                    "start": start,
                    "end": sprint_end_bounds(&project, &siblings, target),
                })
            } else {
                let mut start = sprint_start_bounds(&project, &project.sprints, None);
                if let Some(end) = end {
                    start = start.cap_before_end(end);
                }
                json!({ "start": start })
            };

            write_output(None, &to_json(&report)?)?;
        }
        Commands::Defaults { input } => {
            let project = read_project(input.as_deref())?;
            let errors = check_room_for_sprint(&project, &project.sprints);
            if !errors.is_empty() {
                return report_validation(errors);
            }
            let dates = default_sprint_dates(&project, &project.sprints)
                .context("Failed to propose dates for a new sprint")?;
            let report = json!({
                "label": project.next_sprint_label(),
                "start_date": dates.start_date,
                "end_date": dates.end_date,
            });
            write_output(None, &to_json(&report)?)?;
        }
        Commands::Validate { input, sprint } => {
            let project = read_project(input.as_deref())?;

            let errors = match sprint {
                Some(id) => {
                    let target = project.sprint(id).with_context(|| {
                        format!("Sprint {} not found in project {}", id, project.id)
                    })?;
                    validate_sprint(&project, &project.siblings_of(id), &SprintDraft::from(target))
                }
                None => validate_project_at(&ProjectDraft::from(&project), &project.sprints, today),
            };

            report_validation(errors)?;
        }
        Commands::Remove {
            input,
            output,
            sprint,
        } => {
            let mut project = read_project(input.as_deref())?;
            remove_sprint(&mut project, sprint)
                .with_context(|| format!("Failed to remove sprint {}", sprint))?;
            write_output(output.as_deref(), &to_json(&project)?)?;
        }
    }

    Ok(())
}

/// Print the errors as JSON; exit with status 1 if there are any.
fn report_validation(errors: ErrorSink) -> Result<()> {
    let failed = !errors.is_empty();
    let errors = errors.into_vec();
    write_output(None, &to_json(&errors)?)?;

    if failed {
        tracing::warn!(errors = errors.len(), "validation failed");
        process::exit(1);
    }
    Ok(())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Load a project document and put its sprints in start-date order.
fn read_project(path: Option<&str>) -> Result<Project> {
    let raw = read_input(path)?;
    let mut project: Project =
        serde_json::from_str(&raw).context("Failed to parse project document")?;
    project.sort_sprints();
    Ok(project)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    out.push('\n');
    Ok(out)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
