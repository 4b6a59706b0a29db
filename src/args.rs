//! These structs provide the CLI interface for the expenses CLI.

use chrono::{Datelike, Local};
use clap::Parser;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for building a monthly expense report.
///
/// The purpose of this program is to take the bank statement CSV files you have downloaded into a
/// directory and distill them into a single expense report. Each bank exports a different column
/// layout; statements are recognized by their filenames, reduced to date, description and amount
/// columns, filtered to the requested month, and appended to output/output.csv inside the
/// statements directory. The output directory must already exist.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    /// The directory containing downloaded bank statement CSV files. The report is appended to
    /// output/output.csv inside this directory.
    #[arg(value_name = "STATEMENTS_DIR", env = "EXPENSES_STATEMENTS_DIR")]
    statements: DisplayPath,

    /// The month to report on, 1-12. Defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12), default_value_t = current_month())]
    month: u32,

    /// The year to report on, e.g. 2024. Defaults to the current year.
    #[arg(long, default_value_t = current_year())]
    year: i32,

    /// Leave out records whose description contains this substring. May be repeated; rules are
    /// checked in the order given.
    #[arg(long = "exclude-description", value_name = "SUBSTRING")]
    exclude_description: Vec<String>,
}

impl Args {
    pub fn new(
        common: Common,
        statements: DisplayPath,
        month: u32,
        year: i32,
        exclude_description: Vec<String>,
    ) -> Self {
        Self {
            common,
            statements,
            month,
            year,
            exclude_description,
        }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn statements(&self) -> &DisplayPath {
        &self.statements
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn exclude_description(&self) -> &[String] {
        &self.exclude_description
    }
}

/// Arguments common to the CLI regardless of what it is asked to do.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Common {
    pub fn new(log_level: LevelFilter) -> Self {
        Self { log_level }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

fn current_month() -> u32 {
    Local::now().month()
}

fn current_year() -> i32 {
    Local::now().year()
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
