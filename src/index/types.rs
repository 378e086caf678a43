//! Shard Data Types
//!
//! On-disk structures for a single index shard and the error type of the
//! builder surface.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One indexed file inside a shard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Path under which the file is reported in search results, relative to
    /// the unpack root of its package.
    pub path: String,
    pub size: u64,
}

/// A standalone index fragment for one package: the documents it contains
/// and term → document-id postings over their content.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Shard {
    pub documents: Vec<Document>,
    pub postings: HashMap<String, Vec<u32>>,
}

impl Shard {
    /// Loads a shard from a finished shard file.
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Serializes the shard to `path`, replacing whatever was there.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("shard serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file's content is not valid UTF-8 and cannot be indexed.
    #[error("not indexable, binary content: {0}")]
    Binary(PathBuf),
}

pub type Result<T> = std::result::Result<T, IndexError>;
