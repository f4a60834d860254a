//! Report commands for the aggregate sales queries.
//!
//! Grouped rows can be rendered as a Markdown table, JSON, or CSV; the engine supplies the
//! numbers and this module only formats them.

use crate::commands::{money, Out, OutputFormat};
use crate::report::{self, GroupTotal};
use crate::session::Session;
use crate::{Config, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// Report rows in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    /// JSON array of objects where each row is a self-describing object.
    Json(serde_json::Value),
    /// Markdown table as a single formatted string.
    Table(String),
    /// CSV data as a properly escaped string.
    Csv(String),
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}

/// The total of all sales as a single number.
pub fn report_total(config: Config) -> Result<Out<f64>> {
    let session = Session::open(config)?;
    let total = report::total_sales(session.store());
    Ok(Out::new(format!("Total sales: {}", money(total)), total))
}

/// Sales totals grouped by `YYYY-MM` month, in first-encountered order.
pub fn report_monthly(config: Config, format: OutputFormat) -> Result<Out<Rows>> {
    let session = Session::open(config)?;
    let groups = report::sales_by_month(session.store());
    group_report("month", &groups, format)
}

/// Sales totals grouped by year, in first-encountered order.
pub fn report_annual(config: Config, format: OutputFormat) -> Result<Out<Rows>> {
    let session = Session::open(config)?;
    let groups = report::sales_by_year(session.store());
    group_report("year", &groups, format)
}

/// Sales totals grouped by category, in first-encountered order.
pub fn report_categories(config: Config, format: OutputFormat) -> Result<Out<Rows>> {
    let session = Session::open(config)?;
    let groups = report::sales_by_category(session.store());
    group_report("category", &groups, format)
}

/// The top five categories by sales total, ranked.
pub fn report_top(config: Config, format: OutputFormat) -> Result<Out<Rows>> {
    let session = Session::open(config)?;
    let ranking = report::top_categories(session.store());
    let cells: Vec<Vec<String>> = ranking
        .iter()
        .map(|entry| {
            vec![
                entry.rank.to_string(),
                entry.category.clone(),
                money_cell(entry.total, format),
            ]
        })
        .collect();
    let rows = render(
        &["rank", "category", "total"],
        &cells,
        format,
        serde_json::to_value(&ranking)?,
    )?;
    Ok(Out::new(rows.to_string(), rows))
}

fn group_report(
    label_header: &str,
    groups: &[GroupTotal],
    format: OutputFormat,
) -> Result<Out<Rows>> {
    let cells: Vec<Vec<String>> = groups
        .iter()
        .map(|group| vec![group.label.clone(), money_cell(group.total, format)])
        .collect();
    let rows = render(
        &[label_header, "total"],
        &cells,
        format,
        serde_json::to_value(groups)?,
    )?;
    Ok(Out::new(rows.to_string(), rows))
}

fn render(
    headers: &[&str],
    cells: &[Vec<String>],
    format: OutputFormat,
    json: serde_json::Value,
) -> Result<Rows> {
    match format {
        OutputFormat::Json => Ok(Rows::Json(json)),
        OutputFormat::Table => Ok(Rows::Table(markdown_table(headers, cells))),
        OutputFormat::Csv => Ok(Rows::Csv(to_csv(headers, cells)?)),
    }
}

/// Money cells keep the dollar formatting in tables but stay plain numbers in CSV so the
/// output loads cleanly into other tools.
fn money_cell(value: f64, format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv => format!("{value:.2}"),
        _ => money(value),
    }
}

fn markdown_table(headers: &[&str], cells: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in cells {
        for (ix, cell) in row.iter().enumerate() {
            widths[ix] = widths[ix].max(cell.len());
        }
    }

    let mut out = String::new();
    out.push('|');
    for (header, width) in headers.iter().zip(widths.iter().copied()) {
        out.push_str(&format!(" {header:<width$} |"));
    }
    out.push('\n');
    out.push('|');
    for width in widths.iter().copied() {
        out.push_str(&format!(" {:-<width$} |", ""));
    }
    out.push('\n');
    for row in cells {
        out.push('|');
        for (cell, width) in row.iter().zip(widths.iter().copied()) {
            out.push_str(&format!(" {cell:<width$} |"));
        }
        out.push('\n');
    }
    out
}

fn to_csv(headers: &[&str], cells: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in cells {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .context("Unable to finish the CSV output")?;
    String::from_utf8(bytes).context("The CSV output was not valid UTF-8")
}
