//! CLI command definitions for zen-checklist.
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::types::Recurrence;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Daily checklist: tasks carry forward overnight, recurring tasks come back
/// on schedule, and a protein tracker keeps a per-day running total.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text", global = true)]
    pub format: String,

    /// Skip the startup rollover pass (carry-forward and recurrence)
    #[arg(long, global = true)]
    pub no_rollover: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task
    Add {
        /// Task description
        description: String,

        /// Day the task is scheduled for (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Free-text category label (default: General)
        #[arg(long)]
        category: Option<String>,

        /// Repeat rule: none, daily, weekly, or monthly
        #[arg(long, default_value = "none")]
        recurrence: Recurrence,
    },

    /// List a day's tasks, open tasks first in manual order
    List {
        /// Day to list (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Mark open tasks done
    Done {
        /// Task ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Remove tasks
    Remove {
        /// Task ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Move an open task to a new position in its day's list
    Move {
        /// Task id
        id: i64,

        /// New 0-based position
        position: usize,

        /// Day the task is scheduled for (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Add protein grams to a day's running total
    Protein {
        /// Grams consumed
        grams: u32,

        /// Day to record against (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show tasks and protein for a specific day
    History {
        /// Day to show (YYYY-MM-DD)
        date: NaiveDate,
    },
}
