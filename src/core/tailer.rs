use crate::domain::ports::LogSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::time::Duration;

/// Polling tailer for the Zeek signature log.
///
/// The file is reopened by path on every poll so that log rotation by the
/// Zeek logger does not pin a stale file handle. The first poll seeks to
/// EOF; existing log content is never replayed.
pub struct FileTailer {
    path: PathBuf,
    interval: Duration,
    pos: Option<u64>,
}

impl FileTailer {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
            pos: None,
        }
    }

    /// Read everything appended since `pos`, returning only complete lines.
    /// A trailing partial line (no newline yet) stays in the file until a
    /// later write completes it.
    fn read_new_lines(&mut self, pos: u64) -> Result<Vec<String>> {
        let mut file = File::open(&self.path)?;
        let eof = file.seek(SeekFrom::End(0))?;

        let mut pos = pos;
        if pos > eof {
            tracing::warn!(
                "logfile got shorter, resetting position ({} -> {})",
                pos,
                eof
            );
            pos = eof;
        }

        file.seek(SeekFrom::Start(pos))?;
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;

        let mut lines = Vec::new();
        let mut consumed = 0usize;
        for segment in buf.split_inclusive('\n') {
            if segment.ends_with('\n') {
                consumed += segment.len();
                let line = segment.trim_end();
                if !line.is_empty() {
                    lines.push(line.to_string());
                }
            }
        }

        self.pos = Some(pos + consumed as u64);
        Ok(lines)
    }
}

#[async_trait]
impl LogSource for FileTailer {
    async fn next_lines(&mut self) -> Result<Vec<String>> {
        let pos = match self.pos {
            Some(pos) => pos,
            None => {
                // Initial poll: start at the current end of the log
                tracing::debug!("beginning to tail log file {}", self.path.display());
                let mut file = File::open(&self.path)?;
                let eof = file.seek(SeekFrom::End(0))?;
                self.pos = Some(eof);
                return Ok(Vec::new());
            }
        };

        let lines = self.read_new_lines(pos)?;
        if lines.is_empty() {
            tracing::debug!("no new lines acquired from log file");
            tokio::time::sleep(self.interval).await;
        } else {
            tracing::debug!(
                "acquired {} new {} from log file",
                lines.len(),
                if lines.len() == 1 { "line" } else { "lines" }
            );
        }
        Ok(lines)
    }
}
