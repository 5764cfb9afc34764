use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::report::Report;

pub fn render_report_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string(report)
}

pub fn write_report_json(report: &Report, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut w, report)?;
    writeln!(w)?;
    w.flush()
}
