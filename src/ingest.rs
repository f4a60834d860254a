//! Ingestion and validation of parsed sales data.
//!
//! The JSON tree itself comes from `serde_json`; this module only walks the parsed nodes,
//! validates required fields, and appends well-formed records to the store. Duplicate ids are
//! not checked here, that is the cleaning pass's job.

use crate::model::{SaleRecord, SaleStore};
use crate::Result;
use anyhow::{bail, Context};
use serde::Serialize;
use serde_json::Value;

/// The outcome of an import: either the input held nothing at all, or it was processed and a
/// report of added records and per-row diagnostics is available.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    /// The input was zero bytes long. Distinct from an empty JSON array, which imports
    /// successfully with zero records added.
    NothingToImport,
    Imported(IngestReport),
}

/// Counts and diagnostics from running a batch of input nodes through validation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// The number of records appended to the store.
    pub added: usize,
    /// One human-readable message per rejected row, naming its 1-based position among all
    /// rows seen and the required fields it is missing.
    pub diagnostics: Vec<String>,
}

/// Parses `content` as a JSON array of sale objects and ingests every node.
///
/// # Errors
///
/// - Returns an error if the content is not valid JSON, leaving the store unchanged.
/// - Returns an error if the top level is not an array, leaving the store unchanged.
pub fn import_json(store: &mut SaleStore, content: &str) -> Result<ImportOutcome> {
    if content.is_empty() {
        return Ok(ImportOutcome::NothingToImport);
    }
    let root: Value =
        serde_json::from_str(content).context("Unable to parse the sales data as JSON")?;
    let Value::Array(nodes) = root else {
        bail!("Expected a top-level JSON array of sale objects");
    };
    Ok(ImportOutcome::Imported(ingest_nodes(store, &nodes)))
}

/// Validates each node in encounter order and appends the well-formed ones to the store.
///
/// A monotonically increasing 1-based counter covers every node seen, including rejected
/// ones, and is used in the rejection diagnostics.
pub fn ingest_nodes(store: &mut SaleStore, nodes: &[Value]) -> IngestReport {
    let mut report = IngestReport::default();
    for (ix, node) in nodes.iter().enumerate() {
        match build_record(node) {
            Ok(record) => {
                store.append(record);
                report.added += 1;
            }
            Err(missing) => report.diagnostics.push(format!(
                "Row {} could not be imported because it is missing: {}.",
                ix + 1,
                missing.join(", ")
            )),
        }
    }
    report
}

/// Constructs a [`SaleRecord`] from one parsed node, or returns the human-readable labels of
/// the required fields that are absent or unreadable. Optional fields default to 0 when
/// absent or null.
fn build_record(node: &Value) -> std::result::Result<SaleRecord, Vec<&'static str>> {
    let mut missing = Vec::new();
    let id = require(node, "venta_id", Value::as_i64, "Sale ID", &mut missing);
    let date = require(node, "fecha", Value::as_str, "Date", &mut missing);
    let product_id = require(node, "producto_id", Value::as_i64, "Product ID", &mut missing);
    let product_name = require(
        node,
        "producto_nombre",
        Value::as_str,
        "Product Name",
        &mut missing,
    );
    let category = require(node, "categoria", Value::as_str, "Category", &mut missing);

    match (id, date, product_id, product_name, category) {
        (Some(id), Some(date), Some(product_id), Some(product_name), Some(category)) => {
            Ok(SaleRecord::new(
                id,
                date,
                product_id,
                product_name,
                category,
                node.get("cantidad").and_then(Value::as_i64).unwrap_or(0),
                node.get("precio_unitario")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
                node.get("total").and_then(Value::as_f64).unwrap_or(0.0),
            ))
        }
        _ => Err(missing),
    }
}

/// Reads a required field with the given typed accessor, recording its label when the field
/// is absent or the accessor cannot read it.
fn require<'a, T>(
    node: &'a Value,
    key: &str,
    read: impl Fn(&'a Value) -> Option<T>,
    label: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<T> {
    let value = node.get(key).and_then(read);
    if value.is_none() {
        missing.push(label);
    }
    value
}
