mod clean;
mod config;
mod error;
mod ingest;
mod model;
mod report;
mod session;
mod trends;

pub mod args;
pub mod commands;

pub use clean::{deduplicate, impute_missing, DedupReport, Imputation, ImputeMethod};
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use ingest::{import_json, ingest_nodes, ImportOutcome, IngestReport};
pub use model::{SaleRecord, SaleStore};
pub use report::{
    sales_by_category, sales_by_month, sales_by_year, top_categories, total_sales, GroupTotal,
    RankedCategory,
};
pub use session::Session;
pub use trends::{best_month, busiest_weekday, quarterly_growth, QuarterGrowth, WeekdayCount};
