//! Zen Checklist
//!
//! A daily checklist CLI: unfinished tasks carry forward overnight, recurring
//! tasks come back on schedule, and a protein tracker keeps a per-day total.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::fs::OpenOptions;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;
use zen_checklist::cli::{Cli, Command};
use zen_checklist::config::Config;
use zen_checklist::db::{Database, today};
use zen_checklist::error::ChecklistError;
use zen_checklist::format::{self, OutputFormat};
use zen_checklist::rollover;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let output = OutputFormat::from_str(&cli.format)
        .ok_or_else(|| anyhow!("unknown output format '{}'", cli.format))?;

    // Load configuration, then apply CLI overrides
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    if let Some(db_path) = &cli.database {
        config.storage.db_path = db_path.into();
    }

    config.ensure_db_dir()?;
    let db = Database::open(&config.storage.db_path)?;
    debug!(db_path = %config.storage.db_path.display(), "database opened");

    let today = today();

    // The lifecycle pass runs once per process start, before any list is
    // shown. Both halves are idempotent per day.
    if !cli.no_rollover {
        let summary = rollover::run_startup(&db, today)?;
        debug!(
            carried = summary.carried,
            materialized = summary.materialized,
            "startup rollover finished"
        );
    }

    match run(&db, cli.command, today, output) {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast::<ChecklistError>() {
            Ok(checklist_err) => {
                match output {
                    OutputFormat::Json => {
                        eprintln!("{}", serde_json::to_string(&checklist_err)?);
                    }
                    OutputFormat::Text => {
                        eprintln!("error: {}", checklist_err);
                        if let Some(ref details) = checklist_err.details {
                            eprintln!("  {}", details);
                        }
                    }
                }
                std::process::exit(1);
            }
            Err(err) => Err(err),
        },
    }
}

fn run(db: &Database, command: Command, today: chrono::NaiveDate, output: OutputFormat) -> Result<()> {
    match command {
        Command::Add {
            description,
            date,
            category,
            recurrence,
        } => {
            let date = date.unwrap_or(today);
            let task = db.add_task(&description, date, category.as_deref(), recurrence)?;
            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&task)?),
                OutputFormat::Text => {
                    println!("Added task #{}: {} ({})", task.id, task.description, date)
                }
            }
        }

        Command::List { date } => {
            let date = date.unwrap_or(today);
            let tasks = db.list_tasks(date)?;
            match output {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&format::tasks_to_json(date, &tasks))?
                    )
                }
                OutputFormat::Text => {
                    print!("{}", format::format_tasks_text(date, &tasks));
                    if let Some(grams) = db.protein_for(date)? {
                        println!("Protein: {}g", grams);
                    }
                }
            }
        }

        Command::Done { ids } => {
            let mutated = db.mark_done(&ids)?;
            match output {
                OutputFormat::Json => println!("{}", serde_json::json!({ "done": mutated })),
                OutputFormat::Text => println!("Marked {} task(s) done.", mutated),
            }
        }

        Command::Remove { ids } => {
            let removed = db.remove_tasks(&ids)?;
            match output {
                OutputFormat::Json => println!("{}", serde_json::json!({ "removed": removed })),
                OutputFormat::Text => println!("Removed {} task(s).", removed),
            }
        }

        Command::Move { id, position, date } => {
            let date = date.unwrap_or(today);
            let open = db.move_task(date, id, position)?;
            match output {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&format::tasks_to_json(date, &open))?
                    )
                }
                OutputFormat::Text => print!("{}", format::format_tasks_text(date, &open)),
            }
        }

        Command::Protein { grams, date } => {
            let date = date.unwrap_or(today);
            let total = db.save_protein(date, grams)?;
            match output {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "date": date, "total": total }))
                }
                OutputFormat::Text => println!("Saved: {}g", total),
            }
        }

        Command::History { date } => {
            let history = db.query_history(date)?;
            match output {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&format::history_to_json(&history))?
                    )
                }
                OutputFormat::Text => print!("{}", format::format_history_text(&history)),
            }
        }
    }

    Ok(())
}
