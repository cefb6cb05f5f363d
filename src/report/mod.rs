//! Report rendering.
//!
//! The driver hands its timing series to a [`ReportRenderer`]. Charting is left to
//! external tools; this module ships a plain-text table and a JSON file writer.

use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::bench::{BenchmarkReport, TimingSeries};

/// Consumer of the benchmark's timing series.
pub trait ReportRenderer {
    /// Renders one series per strategy; every series has the same length.
    fn render(&self, series: &[TimingSeries]) -> Result<()>;
}

impl ReportRenderer for Vec<Box<dyn ReportRenderer>> {
    fn render(&self, series: &[TimingSeries]) -> Result<()> {
        for renderer in self {
            renderer.render(series)?;
        }
        Ok(())
    }
}

/// Prints a records-by-strategy table of elapsed seconds to stdout.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl ReportRenderer for TextRenderer {
    fn render(&self, series: &[TimingSeries]) -> Result<()> {
        print!("{}", format_table(series));
        Ok(())
    }
}

/// Formats the series as a fixed-width table, one row per input plus a total row.
pub fn format_table(series: &[TimingSeries]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>12}", "Records");
    for s in series {
        let _ = write!(out, " {:>16}", s.label);
    }
    out.push('\n');

    let rows = series.first().map(|s| s.points.len()).unwrap_or(0);
    for row in 0..rows {
        let count = series[0].points[row].record_count;
        let _ = write!(out, "{:>12}", count);
        for s in series {
            match s.points.get(row) {
                Some(p) => {
                    let _ = write!(out, " {:>15.4}s", p.elapsed_seconds);
                }
                None => {
                    let _ = write!(out, " {:>16}", "-");
                }
            }
        }
        out.push('\n');
    }

    if rows > 0 {
        let _ = write!(out, "{:>12}", "Total");
        for s in series {
            let _ = write!(out, " {:>15.4}s", s.total_seconds());
        }
        out.push('\n');
    }
    out
}

/// Writes the series to a JSON file.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    path: PathBuf,
}

impl JsonRenderer {
    /// Renderer writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, series: &[TimingSeries]) -> Result<()> {
        write_json(&self.path, &series)?;
        info!("Timing series written to {}", self.path.display());
        Ok(())
    }
}

/// Writes the full benchmark report (series and per-run outcomes) as JSON.
pub fn write_report_json(report: &BenchmarkReport, path: &Path) -> Result<()> {
    write_json(path, report)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    Ok(())
}
