//! These structs provide the CLI interface for the ventas CLI.

use crate::clean::ImputeMethod;
use crate::commands::OutputFormat;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// ventas: A command-line tool for analyzing sales transaction data.
///
/// The purpose of this program is to import sales transaction records from JSON files into a
/// local datastore, clean them up (duplicate removal and missing-value imputation), and report
/// aggregate analytics: totals, monthly and annual breakdowns, top categories, the busiest
/// weekday, and quarter-over-quarter growth.
///
/// The records you import are kept as a JSON snapshot inside the data directory, so each
/// command picks up where the previous one left off.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run when setting up the ventas CLI. Decide what
    /// directory you want to store data in and pass it as --ventas-home; by default it will
    /// be $HOME/ventas.
    Init(InitArgs),
    /// Import sales records from a JSON file into the datastore.
    Import(ImportArgs),
    /// Clean the datastore: remove duplicate records and fill in missing values.
    Clean(CleanArgs),
    /// Aggregate sales reports: totals and monthly, annual or per-category breakdowns.
    Report(ReportArgs),
    /// Time-based analyses: best month, busiest weekday and quarterly growth.
    Trends(TrendsArgs),
    /// Write the current records to a JSON file.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where ventas data and configuration is held. Defaults to ~/ventas
    #[arg(long, env = "VENTAS_HOME", default_value_t = default_ventas_home())]
    ventas_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, ventas_home: PathBuf) -> Self {
        Self {
            log_level,
            ventas_home: ventas_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn ventas_home(&self) -> &DisplayPath {
        &self.ventas_home
    }
}

/// Args for the `ventas init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The default statistic for unit-price imputation, stored in the config file. A clean
    /// run can still override it with its own --method.
    #[arg(long, value_enum, default_value_t = ImputeMethod::Mean)]
    method: ImputeMethod,
}

impl InitArgs {
    pub fn new(method: ImputeMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> ImputeMethod {
        self.method
    }
}

/// Args for the `ventas import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// The JSON file to import: a top-level array of sale objects.
    #[arg(long = "file", short = 'f')]
    file: PathBuf,
}

impl ImportArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Args for the `ventas clean` command.
#[derive(Debug, Parser, Clone)]
pub struct CleanArgs {
    /// The statistic for unit-price imputation. Defaults to the configured method.
    #[arg(long, value_enum)]
    method: Option<ImputeMethod>,
}

impl CleanArgs {
    pub fn new(method: Option<ImputeMethod>) -> Self {
        Self { method }
    }

    pub fn method(&self) -> Option<ImputeMethod> {
        self.method
    }
}

/// Args for the `ventas report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The output format for the report rows.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    entity: ReportSubcommand,
}

impl ReportArgs {
    pub fn new(format: OutputFormat, entity: ReportSubcommand) -> Self {
        Self { format, entity }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn entity(&self) -> &ReportSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReportSubcommand {
    /// The total of all sales.
    Total,
    /// Sales totals grouped by month.
    Monthly,
    /// Sales totals grouped by year.
    Annual,
    /// Sales totals grouped by category.
    Categories,
    /// The top five categories by sales total.
    Top,
}

/// Args for the `ventas trends` command.
#[derive(Debug, Parser, Clone)]
pub struct TrendsArgs {
    #[command(subcommand)]
    trend: TrendsSubcommand,
}

impl TrendsArgs {
    pub fn new(trend: TrendsSubcommand) -> Self {
        Self { trend }
    }

    pub fn trend(&self) -> &TrendsSubcommand {
        &self.trend
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TrendsSubcommand {
    /// The month with the highest sales total.
    BestMonth,
    /// The weekday with the most sale records.
    Weekday,
    /// The growth rate of a quarter against the quarter before it.
    Growth(GrowthArgs),
}

/// Args for the `ventas trends growth` command.
#[derive(Debug, Parser, Clone)]
pub struct GrowthArgs {
    /// The quarter to analyze, 1 through 4.
    #[arg(long, short = 'q')]
    quarter: u32,

    /// The calendar year the quarter belongs to.
    #[arg(long, short = 'y')]
    year: i32,
}

impl GrowthArgs {
    pub fn new(quarter: u32, year: i32) -> Self {
        Self { quarter, year }
    }

    pub fn quarter(&self) -> u32 {
        self.quarter
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

/// Args for the `ventas export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The path of the JSON file to write.
    #[arg(long = "file", short = 'f')]
    file: PathBuf,
}

impl ExportArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

fn default_ventas_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("ventas"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --ventas-home or VENTAS_HOME instead of relying on the default \
                ventas home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("ventas")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
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
