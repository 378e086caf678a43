//! Shard Merge Coordinator Tests

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use crate::index::{Shard, ShardWriter};
    use crate::merge::coordinator::merge_shards;
    use crate::metrics::Metrics;

    fn make_shard(dir: &Path, package: &str, file: &str, content: &str) {
        let src = dir.join(file);
        fs::write(&src, content).unwrap();
        let mut writer = ShardWriter::create(dir.join(format!("{}.idx", package))).unwrap();
        writer.add_file(&src, file).unwrap();
        writer.flush().unwrap();
        fs::remove_file(src).unwrap();
    }

    fn idx_count(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == "idx")
            })
            .count()
    }

    #[test]
    fn test_empty_directory_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = merge_shards(dir.path(), &Metrics::new()).unwrap();

        assert!(outcome.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_single_shard_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        make_shard(dir.path(), "pkg-a", "a.c", "alpha");

        let outcome = merge_shards(dir.path(), &Metrics::new()).unwrap();

        assert!(outcome.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_three_shards_merge_into_one_new_file() {
        let dir = tempfile::tempdir().unwrap();
        make_shard(dir.path(), "pkg-a", "a.c", "alpha common");
        make_shard(dir.path(), "pkg-b", "b.c", "beta common");
        make_shard(dir.path(), "pkg-c", "c.c", "gamma common");
        let inputs_before: Vec<_> = ["pkg-a", "pkg-b", "pkg-c"]
            .iter()
            .map(|p| fs::read(dir.path().join(format!("{}.idx", p))).unwrap())
            .collect();

        let combined_path = merge_shards(dir.path(), &Metrics::new()).unwrap().unwrap();

        // One new file, distinct from all inputs, which remain untouched.
        assert!(combined_path.exists());
        assert!(!combined_path.to_string_lossy().ends_with(".idx"));
        assert_eq!(idx_count(dir.path()), 3);
        for (i, package) in ["pkg-a", "pkg-b", "pkg-c"].iter().enumerate() {
            let now = fs::read(dir.path().join(format!("{}.idx", package))).unwrap();
            assert_eq!(now, inputs_before[i]);
        }

        let combined = Shard::read(&combined_path).unwrap();
        assert_eq!(combined.documents.len(), 3);
        assert_eq!(combined.postings.get("common").map(Vec::len), Some(3));
    }

    #[test]
    fn test_combined_output_is_not_reingested_by_a_second_merge() {
        let dir = tempfile::tempdir().unwrap();
        make_shard(dir.path(), "pkg-a", "a.c", "alpha");
        make_shard(dir.path(), "pkg-b", "b.c", "beta");

        let first = merge_shards(dir.path(), &Metrics::new()).unwrap().unwrap();
        let second = merge_shards(dir.path(), &Metrics::new()).unwrap().unwrap();

        // Both merges saw the same two .idx inputs.
        let first_shard = Shard::read(&first).unwrap();
        let second_shard = Shard::read(&second).unwrap();
        assert_eq!(first_shard.documents.len(), 2);
        assert_eq!(second_shard.documents.len(), 2);
    }

    #[test]
    fn test_merge_records_elapsed_time() {
        let dir = tempfile::tempdir().unwrap();
        make_shard(dir.path(), "pkg-a", "a.c", "alpha");
        make_shard(dir.path(), "pkg-b", "b.c", "beta");
        let metrics = Metrics::new();
        metrics.set("last-merge-ms", -1);

        merge_shards(dir.path(), &metrics).unwrap();

        assert!(metrics.get("last-merge-ms") >= 0);
    }
}
