//! Init command handler.

use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the data directory and an initial configuration file.
///
/// # Errors
///
/// - Returns an error if the directory or the config file cannot be created.
pub fn init(home: &Path, args: InitArgs) -> Result<Out<()>> {
    let config = Config::create(home, args.method())?;
    Ok(Out::new_message(format!(
        "Initialized the ventas data directory at '{}'",
        config.root().display()
    )))
}
