//! File target with size-based rotation and backup retention
//!
//! One logical log stream backed by an append-mode file. When a pending
//! write would push the file past `max_file_size`, the target rotates:
//! existing backups shift down one index, the active file becomes
//! `<path>.0`, and a fresh file is opened at the original path. Backup
//! `0` is always the most recently rotated; the oldest backup is
//! discarded once `max_backup_files` is reached. With
//! `max_backup_files = 0` the rotated-out content is deleted.
//!
//! Exactly one `FileTarget` may own a given path; concurrent loggers on
//! the same file require external coordination.

use super::Target;
use crate::core::error::{LoggerError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileTarget {
    base_path: PathBuf,
    max_file_size: u64,
    max_backup_files: usize,
    writer: Option<BufWriter<File>>,
    /// Bytes written since the last rotation, seeded from the existing
    /// file's length so a restarted process resumes the same budget.
    current_size: u64,
}

impl FileTarget {
    /// Open (or resume) the log file at `path`.
    ///
    /// Missing parent directories are a construction error; the engine
    /// does not create them.
    pub fn new(path: impl Into<PathBuf>, max_file_size: u64, max_backup_files: usize) -> Result<Self> {
        let base_path = path.into();

        let file = Self::open_append(&base_path)?;
        let current_size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_target(
                    base_path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok(Self {
            base_path,
            max_file_size,
            max_backup_files,
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    fn open_append(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_target(path.display().to_string(), format!("Failed to open: {}", e))
            })
    }

    /// Backup file path for a given index (`0` = most recent).
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    /// Rotate the active file out and open a fresh one.
    fn rotate(&mut self) -> Result<()> {
        // Flush and close the current handle before any renames
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.max_backup_files == 0 {
            // No backups kept: the rotated-out content is discarded
            if self.base_path.exists() {
                fs::remove_file(&self.base_path).map_err(|e| {
                    LoggerError::file_rotation(
                        self.base_path.display().to_string(),
                        format!("Failed to delete rotated-out file: {}", e),
                    )
                })?;
            }
        } else {
            // Shift backups down: i-1 -> i, discarding the oldest
            let oldest = self.backup_path(self.max_backup_files - 1);
            if oldest.exists() {
                let _ = fs::remove_file(&oldest);
            }
            for i in (1..self.max_backup_files).rev() {
                let from = self.backup_path(i - 1);
                let to = self.backup_path(i);
                if from.exists() {
                    fs::rename(&from, &to).map_err(|e| {
                        LoggerError::file_rotation(
                            from.display().to_string(),
                            format!("Failed to shift backup files: {}", e),
                        )
                    })?;
                }
            }

            if self.base_path.exists() {
                fs::rename(&self.base_path, self.backup_path(0)).map_err(|e| {
                    LoggerError::file_rotation(
                        self.base_path.display().to_string(),
                        format!("Failed to rotate active log file: {}", e),
                    )
                })?;
            }
        }

        let file = Self::open_append(&self.base_path).map_err(|e| {
            LoggerError::file_rotation(
                self.base_path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        Ok(())
    }

    /// Reopen the active file after a failed rotation so logging can
    /// continue against the current file.
    fn recover_writer(&mut self) -> Result<()> {
        if self.writer.is_none() {
            let file = Self::open_append(&self.base_path)?;
            self.current_size = file.metadata().map(|m| m.len()).unwrap_or(0);
            self.writer = Some(BufWriter::new(file));
        }
        Ok(())
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }
}

impl Target for FileTarget {
    fn write_record(&mut self, bytes: &[u8]) -> Result<()> {
        let pending = bytes.len() as u64;

        // Pre-write rotation check. An empty fresh file always accepts the
        // write, even one larger than the limit, so rotation cannot loop.
        if self.current_size > 0 && self.current_size + pending > self.max_file_size {
            if let Err(e) = self.rotate() {
                self.recover_writer().map_err(|_| {
                    LoggerError::file_rotation(
                        self.base_path.display().to_string(),
                        "Rotation failed and the active file could not be reopened".to_string(),
                    )
                })?;
                return Err(e);
            }
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::other("File writer not initialized"))?;
        writer.write_all(bytes).map_err(|e| {
            LoggerError::file_target(
                self.base_path.display().to_string(),
                format!("Failed to write log record: {}", e),
            )
        })?;
        self.current_size += pending;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_target(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileTarget {
    fn drop(&mut self) {
        // Best effort flush; the handle is released with the writer
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
