use std::path::{Path, PathBuf};

use super::types::{Result, Shard};

/// Merges all `inputs` into a single combined shard at `output`. Document
/// ids are remapped by offsetting each input's ids past the documents merged
/// before it; input files are only read, never modified.
pub fn merge(output: &Path, inputs: &[PathBuf]) -> Result<()> {
    let mut combined = Shard::default();

    for input in inputs {
        let shard = Shard::read(input)?;
        let offset = combined.documents.len() as u32;
        combined.documents.extend(shard.documents);
        for (term, doc_ids) in shard.postings {
            combined
                .postings
                .entry(term)
                .or_default()
                .extend(doc_ids.into_iter().map(|id| id + offset));
        }
    }

    combined.write(output)
}
