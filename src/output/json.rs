//! JSON report writer

use crate::output::traits::{CrawlReport, OutputHandler, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the whole report (state, targets, counters) as pretty JSON
pub struct JsonOutput {
    path: PathBuf,
}

impl JsonOutput {
    /// Creates a writer targeting `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl OutputHandler for JsonOutput {
    fn write(&self, report: &CrawlReport) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!(
            "Wrote JSON report ({} targets) to {}",
            report.targets.len(),
            self.path.display()
        );
        Ok(())
    }
}
