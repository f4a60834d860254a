//! Clean command handler.

use crate::args::CleanArgs;
use crate::clean::{deduplicate, impute_missing, Imputation};
use crate::commands::Out;
use crate::session::Session;
use crate::{Config, Result};
use serde::Serialize;

/// Everything one cleaning run changed: removed duplicate ids and imputed field values.
#[derive(Debug, Clone, Serialize)]
pub struct CleanSummary {
    pub removed: Vec<i64>,
    pub imputations: Vec<Imputation>,
}

/// Deduplicates the datastore, imputes missing values, and saves the updated snapshot.
///
/// The unit-price method comes from `--method` when given, otherwise from the config file.
///
/// # Errors
///
/// - Returns an error if the session cannot be opened or the snapshot cannot be saved.
pub fn clean(config: Config, args: CleanArgs) -> Result<Out<CleanSummary>> {
    let method = args.method().unwrap_or_else(|| config.impute_method());
    let mut session = Session::open(config)?;

    let dedup = deduplicate(session.store_mut());
    let imputations = impute_missing(session.store_mut(), method);
    session.save()?;

    let mut lines = Vec::new();
    for id in &dedup.removed {
        lines.push(format!("Removed the duplicate record with Sale ID {id}"));
    }
    for imputation in &imputations {
        lines.push(match imputation {
            Imputation::Quantity { id, value } => {
                format!("Record {id}: quantity replaced with mode {value}")
            }
            Imputation::UnitPrice { id, method, value } => {
                format!("Record {id}: unit price replaced with {method} {value:.2}")
            }
        });
    }
    lines.push(format!(
        "Removed {} duplicate record{} and imputed {} missing value{}",
        dedup.removed.len(),
        if dedup.removed.len() == 1 { "" } else { "s" },
        imputations.len(),
        if imputations.len() == 1 { "" } else { "s" }
    ));

    Ok(Out::new(
        lines.join("\n"),
        CleanSummary {
            removed: dedup.removed,
            imputations,
        },
    ))
}
