//! SQLite-based output handler implementation
//!
//! Every written report becomes one row in `runs` plus one row per target
//! URL in `targets`, so a database file can accumulate many runs.

use crate::output::traits::{CrawlReport, OutputHandler, OutputResult};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// SQL schema for the results database
pub const SCHEMA_SQL: &str = r#"
-- One row per finished crawl run
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    base_url TEXT NOT NULL,
    state TEXT NOT NULL,
    started_at TEXT,
    finished_at TEXT,
    pages_crawled INTEGER NOT NULL,
    targets_found INTEGER NOT NULL,
    fetch_errors INTEGER NOT NULL,
    retries_performed INTEGER NOT NULL
);

-- Target URLs found by each run
CREATE TABLE IF NOT EXISTS targets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    url TEXT NOT NULL,
    UNIQUE(run_id, url)
);

CREATE INDEX IF NOT EXISTS idx_targets_url ON targets(url);
"#;

/// SQLite-based output handler
pub struct SqliteOutput {
    path: PathBuf,
}

impl SqliteOutput {
    /// Creates a handler writing to the database at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Opens the database and makes sure the schema exists
    fn open(&self) -> OutputResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(conn)
    }
}

impl OutputHandler for SqliteOutput {
    fn write(&self, report: &CrawlReport) -> OutputResult<()> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;

        let stats = &report.stats;
        tx.execute(
            "INSERT INTO runs (base_url, state, started_at, finished_at, pages_crawled, \
             targets_found, fetch_errors, retries_performed) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                report.base_url,
                report.state.as_str(),
                stats.started_at.map(|t| t.to_rfc3339()),
                stats.finished_at.map(|t| t.to_rfc3339()),
                stats.pages_crawled as i64,
                stats.targets_found as i64,
                stats.fetch_errors as i64,
                stats.retries_performed as i64,
            ],
        )?;
        let run_id = tx.last_insert_rowid();

        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO targets (run_id, url) VALUES (?1, ?2)")?;
            for url in &report.targets {
                stmt.execute(params![run_id, url])?;
            }
        }

        tx.commit()?;

        tracing::info!(
            "Recorded run {} with {} targets in {}",
            run_id,
            report.targets.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::CrawlState;
    use crate::output::RunStats;
    use tempfile::tempdir;

    fn report(state: CrawlState, targets: &[&str]) -> CrawlReport {
        CrawlReport {
            state,
            base_url: "https://example.com/".to_string(),
            targets: targets.iter().map(|s| s.to_string()).collect(),
            stats: RunStats {
                pages_crawled: 4,
                targets_found: targets.len() as u64,
                ..RunStats::default()
            },
        }
    }

    #[test]
    fn test_write_creates_schema_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.db");

        SqliteOutput::new(&path)
            .write(&report(
                CrawlState::Completed,
                &["https://example.com/a/video/1", "https://example.com/b/video/2"],
            ))
            .unwrap();

        let conn = Connection::open(&path).unwrap();
        let (state, pages): (String, i64) = conn
            .query_row("SELECT state, pages_crawled FROM runs", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        let targets: i64 = conn
            .query_row("SELECT COUNT(*) FROM targets", [], |row| row.get(0))
            .unwrap();

        assert_eq!(state, "completed");
        assert_eq!(pages, 4);
        assert_eq!(targets, 2);
    }

    #[test]
    fn test_runs_accumulate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.db");
        let output = SqliteOutput::new(&path);

        output
            .write(&report(CrawlState::Aborted, &["https://example.com/a/video/1"]))
            .unwrap();
        output
            .write(&report(CrawlState::Completed, &["https://example.com/a/video/1"]))
            .unwrap();

        let conn = Connection::open(&path).unwrap();
        let runs: i64 = conn
            .query_row("SELECT COUNT(*) FROM runs", [], |row| row.get(0))
            .unwrap();
        let targets: i64 = conn
            .query_row("SELECT COUNT(*) FROM targets", [], |row| row.get(0))
            .unwrap();

        assert_eq!(runs, 2);
        assert_eq!(targets, 2);
    }
}
