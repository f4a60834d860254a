//! Trend command handlers: best month, busiest weekday and quarterly growth.

use crate::args::GrowthArgs;
use crate::commands::{money, Out};
use crate::report::GroupTotal;
use crate::session::Session;
use crate::trends::{self, QuarterGrowth, WeekdayCount};
use crate::{Config, Result};

const NO_SALES: &str = "No sales recorded";

/// The month with the highest sales total.
pub fn best_month(config: Config) -> Result<Out<GroupTotal>> {
    let session = Session::open(config)?;
    match trends::best_month(session.store()) {
        Some(best) => {
            let message = format!("The best month was {} with {}", best.label, money(best.total));
            Ok(Out::new(message, best))
        }
        None => Ok(Out::new_message(NO_SALES)),
    }
}

/// The weekday with the most sale records.
pub fn busiest_weekday(config: Config) -> Result<Out<WeekdayCount>> {
    let session = Session::open(config)?;
    match trends::busiest_weekday(session.store()) {
        Some(busiest) => {
            let message = format!(
                "The busiest weekday is {} with {} sale{}",
                busiest.weekday,
                busiest.count,
                if busiest.count == 1 { "" } else { "s" }
            );
            Ok(Out::new(message, busiest))
        }
        None => Ok(Out::new_message(NO_SALES)),
    }
}

/// The growth rate of the requested quarter against the quarter before it.
///
/// # Errors
///
/// - Returns an error if the quarter is outside 1 through 4.
pub fn quarterly_growth(config: Config, args: GrowthArgs) -> Result<Out<QuarterGrowth>> {
    let session = Session::open(config)?;
    let growth = trends::quarterly_growth(session.store(), args.quarter(), args.year())?;
    let message = match &growth {
        QuarterGrowth::Rate { percent, .. } => format!(
            "Q{} {} changed {percent:.2}% against the previous quarter",
            args.quarter(),
            args.year()
        ),
        QuarterGrowth::InsufficientData { .. } => format!(
            "Insufficient data: no sales recorded in the quarter before Q{} {}",
            args.quarter(),
            args.year()
        ),
    };
    Ok(Out::new(message, growth))
}
