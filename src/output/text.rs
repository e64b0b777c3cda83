//! Plain-text report writer
//!
//! Writes one target URL per line in ascending order, followed by a
//! trailing count line:
//!
//! ```text
//! https://example.com/a1/video/x
//! https://example.com/b2/video/y
//!
//! Total: 2
//! ```

use crate::output::traits::{CrawlReport, OutputHandler, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes reports as a sorted newline-delimited list
pub struct TextOutput {
    path: PathBuf,
}

impl TextOutput {
    /// Creates a writer targeting `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Renders a report in the text format
pub fn render_text(report: &CrawlReport) -> String {
    let mut out = String::new();
    for url in &report.targets {
        out.push_str(url);
        out.push('\n');
    }
    out.push_str(&format!("\nTotal: {}\n", report.targets.len()));
    out
}

impl OutputHandler for TextOutput {
    fn write(&self, report: &CrawlReport) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        writer.write_all(render_text(report).as_bytes())?;
        writer.flush()?;

        tracing::info!(
            "Wrote {} target URLs to {}",
            report.targets.len(),
            self.path.display()
        );
        Ok(())
    }
}
