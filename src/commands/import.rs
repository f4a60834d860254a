//! Import command handler.

use crate::args::ImportArgs;
use crate::commands::Out;
use crate::ingest::{self, ImportOutcome, IngestReport};
use crate::session::Session;
use crate::{Config, Result};
use anyhow::Context;

/// Imports sales records from a JSON file and saves the updated snapshot.
///
/// Rows missing required fields are skipped, each with a diagnostic naming its position and
/// the missing fields; the remaining rows still import. Duplicate ids are accepted here and
/// left for the clean command.
///
/// # Errors
///
/// - Returns an error if the file cannot be read, leaving the datastore unchanged.
/// - Returns an error if the content is not a JSON array, leaving the datastore unchanged.
pub fn import(config: Config, args: ImportArgs) -> Result<Out<IngestReport>> {
    let mut session = Session::open(config)?;
    let content = std::fs::read_to_string(args.file()).with_context(|| {
        format!(
            "Unable to read the sales data file '{}'",
            args.file().display()
        )
    })?;

    match ingest::import_json(session.store_mut(), &content)? {
        ImportOutcome::NothingToImport => Ok(Out::new_message(format!(
            "The file '{}' contains nothing to import",
            args.file().display()
        ))),
        ImportOutcome::Imported(report) => {
            session.save()?;
            let mut lines = report.diagnostics.clone();
            lines.push(format!(
                "Imported {} record{}",
                report.added,
                if report.added == 1 { "" } else { "s" }
            ));
            Ok(Out::new(lines.join("\n"), report))
        }
    }
}
