//! File sink
//!
//! Appends rendered lines to a single file. Rotation, retention, and
//! shipping belong to external tooling; this sink only writes.

use crate::core::{RenderedRecord, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&mut self, record: &RenderedRecord) -> Result<()> {
        self.writer.write_all(record.line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Push buffered lines to disk before the handle goes away.
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::Utc;

    #[test]
    fn writes_one_line_per_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.log");

        let mut sink = FileSink::new(&path).expect("create sink");
        for i in 0..3 {
            sink.write(&RenderedRecord {
                level: LogLevel::Info,
                line: format!("line {}", i),
                timestamp: Utc::now(),
            })
            .expect("write");
        }
        sink.flush().expect("flush");

        let content = std::fs::read_to_string(&path).expect("read");
        assert_eq!(content, "line 0\nline 1\nline 2\n");
    }

    #[test]
    fn creation_fails_for_bad_path() {
        let result = FileSink::new("/nonexistent-dir-for-vix/out.log");
        assert!(result.is_err());
    }
}
