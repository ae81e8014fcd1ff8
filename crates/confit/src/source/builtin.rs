//! Built-in data source streams: file, env, string, bytes.

use super::SourceStream;
use crate::error::BoxError;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;

/// Reads a file, opening it lazily on the first read.
pub struct FileStream {
    path: PathBuf,
    file: Option<File>,
}

impl FileStream {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.file.is_none() {
            let file = File::open(&self.path).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("failed to open file {}: {e}", self.path.display()),
                )
            })?;
            self.file = Some(file);
        }
        self.file.as_mut().expect("file just opened").read(buf)
    }
}

impl SourceStream for FileStream {
    fn close(&mut self) -> io::Result<()> {
        // Dropping the handle closes it; a never-opened stream has nothing
        // to release.
        self.file.take();
        Ok(())
    }
}

/// Reads the value of an environment variable, looked up lazily on the
/// first read. An unset variable is a read error naming the variable.
pub struct EnvStream {
    name: String,
    buf: Option<Cursor<Vec<u8>>>,
}

impl EnvStream {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buf: None,
        }
    }
}

impl Read for EnvStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.buf.is_none() {
            let value = std::env::var(&self.name).map_err(|_| {
                io::Error::other(format!("environment variable {} not found", self.name))
            })?;
            self.buf = Some(Cursor::new(value.into_bytes()));
        }
        self.buf.as_mut().expect("buffer just created").read(buf)
    }
}

impl SourceStream for EnvStream {}

/// Reads literal content held in memory.
pub struct BufferStream {
    cursor: Cursor<Vec<u8>>,
}

impl BufferStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }
}

impl Read for BufferStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl SourceStream for BufferStream {}

pub(super) fn file_source(value: &str) -> Result<Box<dyn SourceStream>, BoxError> {
    Ok(Box::new(FileStream::new(value)))
}

pub(super) fn env_source(value: &str) -> Result<Box<dyn SourceStream>, BoxError> {
    Ok(Box::new(EnvStream::new(value)))
}

pub(super) fn string_source(value: &str) -> Result<Box<dyn SourceStream>, BoxError> {
    Ok(Box::new(BufferStream::new(value.as_bytes().to_vec())))
}

pub(super) fn bytes_source(value: &str) -> Result<Box<dyn SourceStream>, BoxError> {
    Ok(Box::new(BufferStream::new(value.as_bytes().to_vec())))
}
