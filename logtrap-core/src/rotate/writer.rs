use crate::record::{LogRecord, RotationKey};
use crate::rotate::RotateError;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 6] = ["timestamp", "pid", "tid", "level", "tag", "message"];

struct OpenFile {
    key: RotationKey,
    path: PathBuf,
    writer: csv::Writer<File>,
}

/// Appends records to `<root>/<bucket>/<prefix>_<minute>.csv`.
///
/// At most one file is open at a time. A record whose rotation key differs
/// from the open file's key closes that file before the next one is opened.
pub struct RotatingWriter {
    root: PathBuf,
    prefix: String,
    current: Option<OpenFile>,
}

impl RotatingWriter {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self, RotateError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| RotateError::CreateDir {
            path: root.clone(),
            source,
        })?;

        Ok(Self {
            root,
            prefix: prefix.into(),
            current: None,
        })
    }

    /// Path of the file currently open, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|f| f.path.as_path())
    }

    pub fn path_for(&self, key: &RotationKey) -> PathBuf {
        self.root.join(&key.bucket).join(key.file_name(&self.prefix))
    }

    pub fn write(&mut self, record: &LogRecord) -> Result<(), RotateError> {
        let key = record.rotation_key();
        let file = self.ensure_open(key)?;

        let level = record.level_str();
        let timestamp = record.formatted_timestamp();
        file.writer
            .write_record([
                timestamp.as_str(),
                record.pid.as_str(),
                record.tid.as_str(),
                level,
                record.tag.as_str(),
                record.message.as_str(),
            ])
            .map_err(|source| RotateError::Write {
                path: file.path.clone(),
                source,
            })
    }

    /// Flush and release the open file. Safe to call repeatedly.
    pub fn close(&mut self) {
        if let Some(file) = self.current.take() {
            finish(file);
        }
    }

    fn ensure_open(&mut self, key: RotationKey) -> Result<&mut OpenFile, RotateError> {
        let file = match self.current.take() {
            Some(file) if file.key == key => file,
            stale => {
                if let Some(file) = stale {
                    finish(file);
                }
                self.open(key)?
            }
        };

        Ok(self.current.insert(file))
    }

    fn open(&self, key: RotationKey) -> Result<OpenFile, RotateError> {
        let path = self.path_for(&key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| RotateError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let is_new = !path.exists();
        let handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| RotateError::Open {
                path: path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(handle);

        if is_new {
            writer
                .write_record(HEADER)
                .map_err(|source| RotateError::Write {
                    path: path.clone(),
                    source,
                })?;
        }

        tracing::debug!(path = %path.display(), new = is_new, "log file opened");

        Ok(OpenFile { key, path, writer })
    }
}

fn finish(mut file: OpenFile) {
    if let Err(e) = file.writer.flush() {
        tracing::debug!(error = %e, path = %file.path.display(), "flush on close failed");
    }
    tracing::debug!(path = %file.path.display(), "log file closed");
}

impl Drop for RotatingWriter {
    fn drop(&mut self) {
        self.close();
    }
}
