use fxhash::FxHashMap;

use crate::classify::ClassifiedRecord;

///
/// Append-only collection of classified records, bucketed by probe key.
///
/// Keys keep their first-seen insertion order, which is the row order of the
/// final table. Duplicate probes in the catalog land in the same bucket and
/// their records accumulate; the raw depth counter, however, is overwritten
/// by the most recent scan of that key (matching the upstream pipeline).
///
/// The raw depth counter is independent of classification: it counts every
/// record fetched for a probe, including records the classifier later drops.
///
#[derive(Debug, Default)]
pub struct MetricAccumulator {
    order: Vec<String>,
    buckets: FxHashMap<String, Vec<ClassifiedRecord>>,
    depths: FxHashMap<String, u64>,
}

impl MetricAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe key, creating an empty bucket if this is the first
    /// time the key is seen. Probes with zero records still get a row, so
    /// every scanned key must be observed even when nothing is appended.
    pub fn observe(&mut self, key: &str) {
        if !self.buckets.contains_key(key) {
            self.order.push(key.to_string());
            self.buckets.insert(key.to_string(), Vec::new());
            self.depths.insert(key.to_string(), 0);
        }
    }

    pub fn record(&mut self, key: &str, classified: ClassifiedRecord) {
        self.observe(key);
        // observe() guarantees the bucket exists
        self.buckets.get_mut(key).unwrap().push(classified);
    }

    /// Set the raw depth for a key. Last write wins across duplicate scans.
    pub fn set_depth(&mut self, key: &str, count: u64) {
        self.observe(key);
        self.depths.insert(key.to_string(), count);
    }

    pub fn count(&self, key: &str) -> u64 {
        self.depths.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate buckets in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClassifiedRecord], u64)> {
        self.order.iter().map(|key| {
            (
                key.as_str(),
                self.buckets[key].as_slice(),
                self.depths[key],
            )
        })
    }
}
