use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use ventas::args::{Args, Command, ReportSubcommand, TrendsSubcommand};
use ventas::{commands, Config, Result};

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().ventas_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.clone())?.print(),

        Command::Import(import_args) => {
            let config = Config::load(home)?;
            commands::import(config, import_args.clone())?.print()
        }

        Command::Clean(clean_args) => {
            let config = Config::load(home)?;
            commands::clean(config, clean_args.clone())?.print()
        }

        Command::Report(report_args) => {
            let config = Config::load(home)?;
            let format = report_args.format();
            match report_args.entity() {
                ReportSubcommand::Total => commands::report_total(config)?.print(),
                ReportSubcommand::Monthly => commands::report_monthly(config, format)?.print(),
                ReportSubcommand::Annual => commands::report_annual(config, format)?.print(),
                ReportSubcommand::Categories => {
                    commands::report_categories(config, format)?.print()
                }
                ReportSubcommand::Top => commands::report_top(config, format)?.print(),
            }
        }

        Command::Trends(trends_args) => {
            let config = Config::load(home)?;
            match trends_args.trend() {
                TrendsSubcommand::BestMonth => commands::best_month(config)?.print(),
                TrendsSubcommand::Weekday => commands::busiest_weekday(config)?.print(),
                TrendsSubcommand::Growth(growth_args) => {
                    commands::quarterly_growth(config, growth_args.clone())?.print()
                }
            }
        }

        Command::Export(export_args) => {
            let config = Config::load(home)?;
            commands::export(config, export_args.clone())?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
