//! Export command handler.

use crate::args::ExportArgs;
use crate::commands::Out;
use crate::session::Session;
use crate::{Config, Result};

/// Writes the current records to a JSON file, every field present, including imputed values.
///
/// # Errors
///
/// - Returns an error if the file cannot be written.
pub fn export(config: Config, args: ExportArgs) -> Result<Out<usize>> {
    let session = Session::open(config)?;
    let count = session.export(args.file())?;
    Ok(Out::new(
        format!(
            "Exported {count} record{} to '{}'",
            if count == 1 { "" } else { "s" },
            args.file().display()
        ),
        count,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ImportArgs;
    use crate::clean::ImputeMethod;
    use crate::commands::import;
    use tempfile::TempDir;

    #[test]
    fn test_export_then_reimport_preserves_every_field() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path().join("ventas"), ImputeMethod::Mean).unwrap();
        let source = dir.path().join("sales.json");
        std::fs::write(
            &source,
            r#"[
                {"venta_id": 1, "fecha": "2024-01-10", "producto_id": 4,
                 "producto_nombre": "X", "categoria": "A",
                 "cantidad": 2, "precio_unitario": 10.5, "total": 21.0}
            ]"#,
        )
        .unwrap();
        import(config.clone(), ImportArgs::new(&source)).unwrap();

        let exported = dir.path().join("exported.json");
        let out = export(config.clone(), ExportArgs::new(&exported)).unwrap();
        assert_eq!(out.structure(), Some(&1));
        assert!(out.message().contains("Exported 1 record"));

        let before = Session::open(config.clone()).unwrap();
        std::fs::remove_file(config.snapshot_path()).unwrap();
        import(config.clone(), ImportArgs::new(&exported)).unwrap();
        let after = Session::open(config).unwrap();
        assert_eq!(before.store(), after.store());
    }
}
