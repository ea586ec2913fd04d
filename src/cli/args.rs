//! CLI argument definitions using clap
//!
//! Commands:
//! - roadbase init
//! - roadbase export <output> / roadbase import <input> --mode <mode>
//! - roadbase add-* / remove-* per record kind
//! - roadbase list <kind>
//!
//! Every field of an `add-*` command is optional on the command line; the
//! registry validators report all missing or malformed fields in one pass,
//! so nothing is rejected at the argument-parsing stage.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::exchange::ImportMode;

/// roadbase - a records system for traffic-enforcement data
#[derive(Parser, Debug)]
#[command(name = "roadbase")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./roadbase.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty data file
    Init,

    /// Export all records to an interchange document
    Export {
        /// Output document path
        output: PathBuf,
    },

    /// Import an interchange document
    Import {
        /// Input document path
        input: PathBuf,

        /// Conflict-resolution mode
        #[arg(long, value_enum, default_value = "upsert")]
        mode: ModeArg,
    },

    /// Add a driver
    AddDriver {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        middle_name: Option<String>,
        #[arg(long)]
        license_number: Option<String>,
        /// Birth date, YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },

    /// Add a car
    AddCar {
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        vin: Option<String>,
        #[arg(long)]
        plate: Option<String>,
        /// Owner's driver license number
        #[arg(long)]
        owner: Option<String>,
        /// Last inspection date, YYYY-MM-DD
        #[arg(long)]
        last_inspection: Option<String>,
    },

    /// Add a violation article
    AddArticle {
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        fine: Option<i64>,
    },

    /// Add a violation type
    AddType {
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a violation
    AddViolation {
        #[arg(long)]
        resolution: Option<String>,
        /// License plate of the car
        #[arg(long)]
        car: Option<String>,
        /// Article code
        #[arg(long)]
        article: Option<String>,
        /// Violation type name
        #[arg(long = "type")]
        violation_type: Option<String>,
        /// Violation date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        paid: bool,
    },

    /// Remove a driver by license number (cascades to cars and violations)
    RemoveDriver { license_number: String },

    /// Remove a car by license plate (cascades to violations)
    RemoveCar { plate: String },

    /// Remove a violation article by code (cascades to violations)
    RemoveArticle { code: String },

    /// Remove a violation type by name (cascades to violations)
    RemoveType { name: String },

    /// Remove a violation by resolution number
    RemoveViolation { resolution: String },

    /// List all records of one kind
    List {
        #[arg(value_enum)]
        kind: KindArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Replace,
    AddOnly,
    Upsert,
}

impl From<ModeArg> for ImportMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Replace => ImportMode::Replace,
            ModeArg::AddOnly => ImportMode::AddOnly,
            ModeArg::Upsert => ImportMode::Upsert,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum KindArg {
    Drivers,
    Cars,
    Articles,
    Types,
    Violations,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
