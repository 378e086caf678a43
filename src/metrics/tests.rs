//! Metrics Sink Tests

#[cfg(test)]
mod tests {
    use crate::metrics::Metrics;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = Metrics::new();
        assert_eq!(metrics.get("package-uploads"), 0);
    }

    #[test]
    fn test_increment_decrement_set() {
        let metrics = Metrics::new();

        metrics.increment("index-jobs-queued");
        metrics.increment("index-jobs-queued");
        assert_eq!(metrics.get("index-jobs-queued"), 2);

        metrics.decrement("index-jobs-queued");
        assert_eq!(metrics.get("index-jobs-queued"), 1);

        metrics.set("last-merge-ms", 1234);
        assert_eq!(metrics.get("last-merge-ms"), 1234);
    }
}
