//! Flat-file record store.
//!
//! # Responsibility
//! - Persist one record per line in a single UTF-8 text file.
//! - Rewrite the whole file for updates and deletes.
//!
//! # Invariants
//! - File handles are opened and closed within each call, never held.
//! - The file is created on first access, but its parent directory is not.
//! - Reads only need read access; non-UTF-8 lines reach the codec instead of
//!   failing the scan.
//! - Rewrites preserve the relative order of surviving lines and drop
//!   blank lines.
//! - Callers serialize mutations; the store itself takes no lock.

use super::record_id::extract_record_id;
use super::{RecordStore, StoreError, StoreResult};
use log::{debug, error};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Record store backed by one newline-delimited text file.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self, options: &mut OpenOptions) -> StoreResult<File> {
        options
            .create(true)
            .open(&self.path)
            .map_err(|source| self.unavailable(source))
    }

    fn unavailable(&self, source: io::Error) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }

    /// Opens the file read-only, creating it first when it does not exist.
    fn open_for_read(&self) -> StoreResult<File> {
        match File::open(&self.path) {
            Ok(file) => Ok(file),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.open(OpenOptions::new().append(true))?;
                File::open(&self.path).map_err(|source| self.unavailable(source))
            }
            Err(source) => Err(self.unavailable(source)),
        }
    }

    /// Returns the non-blank lines as raw bytes, without line terminators.
    ///
    /// Lines are not required to be UTF-8; a malformed line is left for the
    /// codec to reject.
    fn read_raw_lines(&self) -> StoreResult<Vec<Vec<u8>>> {
        let mut reader = BufReader::new(self.open_for_read()?);
        let mut lines = Vec::new();
        loop {
            let mut line = Vec::new();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|source| self.unavailable(source))?;
            if read == 0 {
                break;
            }
            if line.ends_with(b"\n") {
                line.pop();
                if line.ends_with(b"\r") {
                    line.pop();
                }
            }
            if !String::from_utf8_lossy(&line).trim().is_empty() {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    fn read_lines(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .read_raw_lines()?
            .iter()
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect())
    }

    fn rewrite(&self, lines: &[Vec<u8>]) -> StoreResult<()> {
        let file = self.open(OpenOptions::new().write(true).truncate(true))?;
        let mut writer = BufWriter::new(file);
        for line in lines {
            writer
                .write_all(line)
                .and_then(|()| writer.write_all(b"\n"))
                .map_err(|source| self.unavailable(source))?;
        }
        writer.flush().map_err(|source| self.unavailable(source))
    }

    /// Reads all records, lets `edit` transform the matching ones, and
    /// rewrites the file only when at least one record matched. Records
    /// that do not match are written back byte for byte.
    fn rewrite_matching<F>(&self, id: &str, mut edit: F) -> StoreResult<()>
    where
        F: FnMut(Vec<u8>) -> Option<Vec<u8>>,
    {
        if id.is_empty() {
            return Err(StoreError::NotFound(String::new()));
        }

        let mut found = false;
        let mut next = Vec::new();
        for line in self.read_raw_lines()? {
            if extract_record_id(&String::from_utf8_lossy(&line)) == id {
                found = true;
                next.extend(edit(line));
            } else {
                next.push(line);
            }
        }

        if !found {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.rewrite(&next)
    }
}

impl RecordStore for FileRecordStore {
    fn find_all(&self) -> StoreResult<Vec<String>> {
        let started_at = Instant::now();
        finish("store_find_all", started_at, self.read_lines())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<String> {
        let started_at = Instant::now();
        let result = if id.is_empty() {
            Err(StoreError::NotFound(String::new()))
        } else {
            self.read_lines().and_then(|lines| {
                lines
                    .into_iter()
                    .find(|line| extract_record_id(line) == id)
                    .ok_or_else(|| StoreError::NotFound(id.to_string()))
            })
        };
        finish("store_find_by_id", started_at, result)
    }

    fn insert(&self, record: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self
            .open(OpenOptions::new().append(true))
            .and_then(|mut file| {
                // Leading separator keeps one record per line even when the
                // file does not end with a newline.
                write!(file, "\n{record}").map_err(|source| self.unavailable(source))
            });
        finish("store_insert", started_at, result)
    }

    fn update(&self, id: &str, record: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.rewrite_matching(id, |_| Some(record.as_bytes().to_vec()));
        finish("store_update", started_at, result)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.rewrite_matching(id, |_| None);
        finish("store_delete", started_at, result)
    }

    fn clear(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self
            .open(OpenOptions::new().write(true).truncate(true))
            .map(drop);
        finish("store_clear", started_at, result)
    }
}

fn finish<T>(event: &str, started_at: Instant, result: StoreResult<T>) -> StoreResult<T> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => debug!("event={event} module=store status=ok duration_ms={duration_ms}"),
        Err(StoreError::NotFound(_)) => {
            debug!("event={event} module=store status=not_found duration_ms={duration_ms}")
        }
        Err(err) => error!(
            "event={event} module=store status=error duration_ms={duration_ms} error={err}"
        ),
    }
    result
}
