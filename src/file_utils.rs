use anyhow::{Context, Result};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::errors::ConvertError;

// @module: Input sources and file helpers

/// Where a termbase is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    // @variant: File on disk, opened when the conversion starts
    Path(PathBuf),
    // @variant: Markup already held in memory
    Buffer(Vec<u8>),
}

impl InputSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    pub fn from_string(xml: &str) -> Self {
        Self::Buffer(xml.as_bytes().to_vec())
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) => Some(path),
            Self::Buffer(_) => None,
        }
    }

    /// Open a buffered stream over the input
    pub fn open(&self) -> Result<Box<dyn BufRead + '_>, ConvertError> {
        match self {
            Self::Path(path) => {
                let file = File::open(path).map_err(|source| ConvertError::Io {
                    path: Some(path.clone()),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            Self::Buffer(bytes) => Ok(Box::new(bytes.as_slice())),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{:?}", path),
            Self::Buffer(bytes) => write!(f, "<buffer of {} bytes>", bytes.len()),
        }
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
