//! Size-rotated append-only file writer.
//!
//! Trace export appends one JSON document per line. Once the live file
//! exceeds the policy's size limit it is shifted into numbered backups
//! (`<file>.1` newest, `<file>.N` oldest) and a fresh file is started; the
//! oldest backup falls off the end.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// When to rotate and how many rotated files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MiB per file, three backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Thread-safe rotating line writer.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct RotatingFileWriter {
    path: PathBuf,
    policy: RotationPolicy,
    file: Mutex<Option<File>>,
}

impl RotatingFileWriter {
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation, opening, writing or flushing fails, or if
    /// the internal lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;

        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.policy.max_bytes)
    }

    /// Shifts `<file>.k` to `<file>.k+1`, dropping the oldest, then moves the
    /// live file to `<file>.1`.
    fn rotate(&self) -> io::Result<()> {
        if self.policy.max_backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.policy.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.policy.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_policy() -> RotationPolicy {
        RotationPolicy {
            max_bytes: 10,
            max_backups: 2,
        }
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFileWriter::new(path.clone(), RotationPolicy::default());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_when_over_limit() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFileWriter::new(path.clone(), small_policy());

        writer.write_line("first-line-long").unwrap();
        writer.write_line("second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("trace.json.1")).unwrap(),
            "first-line-long\n"
        );
    }

    #[test]
    fn keeps_at_most_max_backups() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFileWriter::new(path.clone(), small_policy());

        for i in 0..5 {
            writer.write_line(&format!("line-number-{i}")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line-number-4\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("trace.json.1")).unwrap(),
            "line-number-3\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("trace.json.2")).unwrap(),
            "line-number-2\n"
        );
        assert!(!dir.path().join("trace.json.3").exists());
    }
}
