//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::exchange::{self, SkippedRecord};
use crate::model::EntityKind;
use crate::registry::{self, RegistryError};
use crate::store::Store;
use crate::validate::{ArticleDraft, CarDraft, DriverDraft, TypeDraft, ViolationDraft};

use super::args::{Cli, Command, KindArg};
use super::errors::{CliError, CliResult};

/// Configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the state file holding all records.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./roadbase.data")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: default_data_file(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`. A missing file means defaults;
    /// a present but unreadable or malformed one is an error.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| CliError::config(path, e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| CliError::config(path, e.to_string()))
    }
}

pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::Init => {
            Store::create(&config.data_file)?;
            println!("initialized {}", config.data_file.display());
            Ok(())
        }

        Command::Export { output } => {
            let store = Store::open(&config.data_file)?;
            exchange::export(&store, &output)?;
            println!("exported to {}", output.display());
            Ok(())
        }

        Command::Import { input, mode } => {
            let mut store = Store::open(&config.data_file)?;
            let report = exchange::import(&mut store, &input, mode.into())?;
            println!("{}", report);
            for skipped in &report.skipped {
                print_skipped(skipped);
            }
            Ok(())
        }

        Command::AddDriver {
            first_name,
            last_name,
            middle_name,
            license_number,
            birth_date,
            city,
        } => {
            let mut store = Store::open(&config.data_file)?;
            let draft = DriverDraft {
                first_name,
                last_name,
                middle_name,
                license_number,
                birth_date: parse_date(birth_date.as_deref()),
                city,
            };
            registry::add_driver(&mut store, &draft)?;
            println!("driver added");
            Ok(())
        }

        Command::AddCar {
            brand,
            model,
            vin,
            plate,
            owner,
            last_inspection,
        } => {
            let mut store = Store::open(&config.data_file)?;
            let owner = match owner {
                Some(license) => Some(resolve_driver(&store, &license)?),
                None => None,
            };
            let draft = CarDraft {
                brand,
                model,
                vin_number: vin,
                license_plate: plate,
                owner,
                last_inspection: parse_date(last_inspection.as_deref()),
            };
            registry::add_car(&mut store, &draft)?;
            println!("car added");
            Ok(())
        }

        Command::AddArticle {
            code,
            description,
            fine,
        } => {
            let mut store = Store::open(&config.data_file)?;
            let draft = ArticleDraft {
                code,
                description,
                fine,
            };
            registry::add_article(&mut store, &draft)?;
            println!("article added");
            Ok(())
        }

        Command::AddType { name } => {
            let mut store = Store::open(&config.data_file)?;
            registry::add_type(&mut store, &TypeDraft { name })?;
            println!("violation type added");
            Ok(())
        }

        Command::AddViolation {
            resolution,
            car,
            article,
            violation_type,
            date,
            paid,
        } => {
            let mut store = Store::open(&config.data_file)?;
            let car = match car {
                Some(plate) => Some(resolve_car(&store, &plate)?),
                None => None,
            };
            let article = match article {
                Some(code) => Some(resolve_article(&store, &code)?),
                None => None,
            };
            let violation_type = match violation_type {
                Some(name) => Some(resolve_type(&store, &name)?),
                None => None,
            };
            let draft = ViolationDraft {
                resolution,
                car,
                article,
                violation_type,
                date: parse_date(date.as_deref()),
                paid,
            };
            registry::add_violation(&mut store, &draft)?;
            println!("violation added");
            Ok(())
        }

        Command::RemoveDriver { license_number } => {
            let mut store = Store::open(&config.data_file)?;
            registry::delete_driver(&mut store, &license_number)?;
            println!("driver removed");
            Ok(())
        }

        Command::RemoveCar { plate } => {
            let mut store = Store::open(&config.data_file)?;
            registry::delete_car(&mut store, &plate)?;
            println!("car removed");
            Ok(())
        }

        Command::RemoveArticle { code } => {
            let mut store = Store::open(&config.data_file)?;
            registry::delete_article(&mut store, &code)?;
            println!("article removed");
            Ok(())
        }

        Command::RemoveType { name } => {
            let mut store = Store::open(&config.data_file)?;
            registry::delete_type(&mut store, &name)?;
            println!("violation type removed");
            Ok(())
        }

        Command::RemoveViolation { resolution } => {
            let mut store = Store::open(&config.data_file)?;
            registry::delete_violation(&mut store, &resolution)?;
            println!("violation removed");
            Ok(())
        }

        Command::List { kind } => {
            let store = Store::open(&config.data_file)?;
            list(&store, kind);
            Ok(())
        }
    }
}

fn list(store: &Store, kind: KindArg) {
    match kind {
        KindArg::Drivers => {
            for d in store.drivers() {
                let middle = d.middle_name.as_deref().unwrap_or("");
                println!(
                    "{}  {} {} {}  born {}  {}",
                    d.license_number, d.last_name, d.first_name, middle, d.birth_date, d.city
                );
            }
        }
        KindArg::Cars => {
            for c in store.cars() {
                let owner = store
                    .driver(c.owner)
                    .map(|d| d.license_number.as_str())
                    .unwrap_or("?");
                println!(
                    "{}  {} {}  vin {}  owner {}  inspected {}",
                    c.license_plate, c.brand, c.model, c.vin_number, owner, c.last_inspection
                );
            }
        }
        KindArg::Articles => {
            for a in store.articles() {
                println!("{}  {}  fine {}", a.code, a.description, a.fine);
            }
        }
        KindArg::Types => {
            for t in store.types() {
                println!("{}", t.name);
            }
        }
        KindArg::Violations => {
            for v in store.violations() {
                let plate = store
                    .car(v.car)
                    .map(|c| c.license_plate.as_str())
                    .unwrap_or("?");
                let code = store
                    .article(v.article)
                    .map(|a| a.code.as_str())
                    .unwrap_or("?");
                let paid = if v.paid { "paid" } else { "unpaid" };
                println!(
                    "{}  {}  article {}  on {}  {}",
                    v.resolution, plate, code, v.date, paid
                );
            }
        }
    }
}

fn print_skipped(skipped: &SkippedRecord) {
    println!("  skipped {} '{}': {}", skipped.kind, skipped.key, skipped.reason);
}

fn resolve_driver(store: &Store, license: &str) -> CliResult<crate::model::RecordId> {
    store
        .find_driver_by_license(license)
        .map(|d| d.id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Driver, license).into())
}

fn resolve_car(store: &Store, plate: &str) -> CliResult<crate::model::RecordId> {
    store
        .find_car_by_plate(plate)
        .map(|c| c.id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Car, plate).into())
}

fn resolve_article(store: &Store, code: &str) -> CliResult<crate::model::RecordId> {
    store
        .find_article_by_code(code)
        .map(|a| a.id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::ViolationArticle, code).into())
}

fn resolve_type(store: &Store, name: &str) -> CliResult<crate::model::RecordId> {
    store
        .find_type_by_name(name)
        .map(|t| t.id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::ViolationType, name).into())
}

/// Parses a `YYYY-MM-DD` date; a malformed value is dropped with a warning
/// so the validator reports the field as missing instead of aborting.
fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?;
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(value = raw, "ignoring malformed date");
            None
        }
    }
}
