use std::fs;
use std::path::{Path, PathBuf};

use super::tokenizer::tokenize_text;
use super::types::{Document, IndexError, Result, Shard};

/// Builds one package's index shard. Owned exclusively by the worker that
/// created it; `flush` finalizes the file, after which it is immutable and
/// visible to merges.
pub struct ShardWriter {
    path: PathBuf,
    shard: Shard,
}

impl ShardWriter {
    /// Opens a new, empty shard at `path`. The file is claimed on disk
    /// immediately; `flush` rewrites it with the accumulated contents.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Shard::default().write(&path)?;
        Ok(Self {
            path,
            shard: Shard::default(),
        })
    }

    /// Reads the file at `disk_path` and adds it to the shard under
    /// `indexed_path`. Fails with [`IndexError::Binary`] when the content is
    /// not valid UTF-8; the caller decides what to do with the file on disk.
    pub fn add_file(&mut self, disk_path: &Path, indexed_path: &str) -> Result<()> {
        let bytes = fs::read(disk_path)?;
        let size = bytes.len() as u64;
        let text = String::from_utf8(bytes)
            .map_err(|_| IndexError::Binary(disk_path.to_path_buf()))?;

        let doc_id = self.shard.documents.len() as u32;
        self.shard.documents.push(Document {
            path: indexed_path.to_string(),
            size,
        });
        for term in tokenize_text(&text) {
            self.shard.postings.entry(term).or_default().push(doc_id);
        }
        Ok(())
    }

    pub fn doc_count(&self) -> usize {
        self.shard.documents.len()
    }

    /// Writes the finished shard and consumes the writer.
    pub fn flush(self) -> Result<PathBuf> {
        self.shard.write(&self.path)?;
        Ok(self.path)
    }
}
