//! Index Builder Tests
//!
//! Validates the shard writer lifecycle (create → add_file → flush), the
//! binary-content rejection the pipeline relies on, and doc-id remapping
//! during merges.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::index::tokenizer::tokenize_text;
    use crate::index::types::IndexError;
    use crate::index::{merge, Shard, ShardWriter};

    fn write_source(dir: &std::path::Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    // ============================================================
    // TOKENIZER
    // ============================================================

    #[test]
    fn test_tokenizer_extracts_lowercased_identifiers() {
        let terms = tokenize_text("fn mainLoop(&self) -> Result<(), io::Error> { x }");

        assert!(terms.contains("mainloop"));
        assert!(terms.contains("self"));
        assert!(terms.contains("result"));
        assert!(terms.contains("error"));
        // Terms of length <= 2 are dropped.
        assert!(!terms.contains("fn"));
        assert!(!terms.contains("io"));
        assert!(!terms.contains("x"));
    }

    // ============================================================
    // SHARD WRITER
    // ============================================================

    #[test]
    fn test_create_claims_an_empty_shard_file() {
        let dir = tempfile::tempdir().unwrap();
        let shard_path = dir.path().join("pkg_1.0-1.idx");

        let writer = ShardWriter::create(&shard_path).unwrap();

        assert!(shard_path.exists());
        assert_eq!(writer.doc_count(), 0);
        let shard = Shard::read(&shard_path).unwrap();
        assert!(shard.documents.is_empty());
    }

    #[test]
    fn test_add_file_and_flush_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_source(dir.path(), "main.c", b"int main(void) { return processQueue(); }");
        let shard_path = dir.path().join("pkg_1.0-1.idx");

        let mut writer = ShardWriter::create(&shard_path).unwrap();
        writer.add_file(&src, "src/main.c").unwrap();
        let flushed = writer.flush().unwrap();
        assert_eq!(flushed, shard_path);

        let shard = Shard::read(&shard_path).unwrap();
        assert_eq!(shard.documents.len(), 1);
        assert_eq!(shard.documents[0].path, "src/main.c");
        assert_eq!(shard.postings.get("processqueue"), Some(&vec![0]));
        assert_eq!(shard.postings.get("main"), Some(&vec![0]));
    }

    #[test]
    fn test_add_file_rejects_binary_content() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_source(dir.path(), "blob.bin", &[0xff, 0xfe, 0x00, 0x81]);
        let mut writer = ShardWriter::create(dir.path().join("pkg.idx")).unwrap();

        let err = writer.add_file(&src, "blob.bin").unwrap_err();

        assert!(matches!(err, IndexError::Binary(_)));
        assert_eq!(writer.doc_count(), 0);
    }

    // ============================================================
    // MERGE
    // ============================================================

    #[test]
    fn test_merge_remaps_document_ids() {
        let dir = tempfile::tempdir().unwrap();
        let src_a = write_source(dir.path(), "a.c", b"alpha shared");
        let src_b = write_source(dir.path(), "b.c", b"beta shared");

        let shard_a = dir.path().join("pkg-a.idx");
        let mut writer = ShardWriter::create(&shard_a).unwrap();
        writer.add_file(&src_a, "a.c").unwrap();
        writer.flush().unwrap();

        let shard_b = dir.path().join("pkg-b.idx");
        let mut writer = ShardWriter::create(&shard_b).unwrap();
        writer.add_file(&src_b, "b.c").unwrap();
        writer.flush().unwrap();

        let combined_path = dir.path().join("combined");
        merge(&combined_path, &[shard_a.clone(), shard_b.clone()]).unwrap();

        let combined = Shard::read(&combined_path).unwrap();
        assert_eq!(combined.documents.len(), 2);
        assert_eq!(combined.documents[0].path, "a.c");
        assert_eq!(combined.documents[1].path, "b.c");
        // Postings from the second shard point at the remapped id.
        assert_eq!(combined.postings.get("alpha"), Some(&vec![0]));
        assert_eq!(combined.postings.get("beta"), Some(&vec![1]));
        let mut shared = combined.postings.get("shared").unwrap().clone();
        shared.sort_unstable();
        assert_eq!(shared, vec![0, 1]);
    }

    #[test]
    fn test_merge_leaves_inputs_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_source(dir.path(), "a.c", b"alpha");

        let shard_path = dir.path().join("pkg-a.idx");
        let mut writer = ShardWriter::create(&shard_path).unwrap();
        writer.add_file(&src, "a.c").unwrap();
        writer.flush().unwrap();
        let before = fs::read(&shard_path).unwrap();

        merge(&dir.path().join("combined"), &[shard_path.clone()]).unwrap();

        assert_eq!(fs::read(&shard_path).unwrap(), before);
    }
}
