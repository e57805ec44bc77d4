//! Rendering of result rows as a table, JSON or CSV.

use std::io::Write;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A result row with a fixed set of columns.
pub trait Tabular: Serialize {
    /// Column names, in display order.
    const HEADERS: &'static [&'static str];

    /// Cell text for each column, prices printed with `precision` decimals.
    fn cells(&self, precision: usize) -> Vec<String>;
}

/// Formats an optional number, `-` when absent.
pub fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

/// Writes `rows` to `out` in the requested format.
pub fn render<R: Tabular, W: Write>(
    rows: &[R],
    format: OutputFormat,
    precision: usize,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(rows, precision, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(R::HEADERS)?;
            for row in rows {
                writer.write_record(row.cells(precision))?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

fn write_table<R: Tabular, W: Write>(rows: &[R], precision: usize, out: &mut W) -> Result<()> {
    let cells: Vec<Vec<String>> = rows.iter().map(|row| row.cells(precision)).collect();
    let widths: Vec<usize> = R::HEADERS
        .iter()
        .enumerate()
        .map(|(column, header)| {
            cells
                .iter()
                .map(|row| row[column].chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };

    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    let header: Vec<String> = R::HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!(" {:<w$} ", h, w = w))
        .collect();
    writeln!(out, "│{}│", header.join("│"))?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {:>w$} ", cell, w = w))
            .collect();
        writeln!(out, "│{}│", line.join("│"))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;
    Ok(())
}
