use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::OutputLayout;
use crate::pipeline::PassReport;

pub fn render_json(report: &PassReport, layout: OutputLayout) -> Result<String> {
    let json = match layout {
        OutputLayout::Grouped => serde_json::to_string_pretty(&report.games),
        OutputLayout::Flat => serde_json::to_string_pretty(&report.flat_lines()),
    };
    json.context("serialize betting lines")
}

/// Pretty-print the pass to `path`, replacing any previous file whole.
/// Returns the number of records written.
pub fn write_json(path: &Path, report: &PassReport, layout: OutputLayout) -> Result<usize> {
    let json = render_json(report, layout)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("create output dir {}", dir.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(report.record_count())
}
