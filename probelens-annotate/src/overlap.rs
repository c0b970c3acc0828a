use fxhash::FxHashMap;

use probelens_core::ProbeCatalog;

/// Represent a range from [start, end)
/// Inclusive start, exclusive of end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Compute the intersect between this interval and a query range
    #[inline]
    pub fn intersect(&self, start: u32, end: u32) -> u32 {
        std::cmp::min(self.end, end).saturating_sub(std::cmp::max(self.start, start))
    }

    /// Check if this interval overlaps a query range
    #[inline]
    pub fn overlap(&self, start: u32, end: u32) -> bool {
        self.start < end && self.end > start
    }
}

/// Per-chromosome interval list sorted by start, queried by binary search.
/// Tracking the longest interval bounds how far back of the query start the
/// scan must begin.
#[derive(Debug, Default)]
struct ChromIntervals {
    intervals: Vec<Interval>,
    max_len: u32,
}

///
/// A genome-wide index over one annotation track, for fast per-query
/// overlap lookups.
///
#[derive(Debug, Default)]
pub struct AnnotationIndex {
    chroms: FxHashMap<String, ChromIntervals>,
}

impl AnnotationIndex {
    pub fn build(annotations: &ProbeCatalog) -> Self {
        let mut chroms: FxHashMap<String, ChromIntervals> = FxHashMap::default();

        for probe in annotations {
            let chrom = chroms.entry(probe.chrom.clone()).or_default();
            chrom.intervals.push(Interval {
                start: probe.start,
                end: probe.end,
            });
            chrom.max_len = chrom.max_len.max(probe.width());
        }

        for chrom in chroms.values_mut() {
            chrom.intervals.sort_by_key(|i| (i.start, i.end));
        }

        AnnotationIndex { chroms }
    }

    /// Find all annotation intervals overlapping `chrom:start-end`.
    pub fn find(&self, chrom: &str, start: u32, end: u32) -> Vec<Interval> {
        let Some(chrom) = self.chroms.get(chrom) else {
            return Vec::new();
        };

        // earliest start that could still reach the query
        let from = start.saturating_sub(chrom.max_len);
        let offset = chrom.intervals.partition_point(|i| i.start < from);

        chrom.intervals[offset..]
            .iter()
            .take_while(|i| i.start < end)
            .filter(|i| i.overlap(start, end))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;
    use probelens_core::Probe;

    fn probe(chrom: &str, start: u32, end: u32) -> Probe {
        Probe {
            chrom: chrom.to_string(),
            start,
            end,
        }
    }

    #[rstest]
    fn test_find_overlaps() {
        let annotations = ProbeCatalog::from(vec![
            probe("chr1", 100, 200),
            probe("chr1", 150, 300),
            probe("chr1", 400, 500),
            probe("chr2", 100, 200),
        ]);
        let index = AnnotationIndex::build(&annotations);

        let hits = index.find("chr1", 180, 250);
        assert_eq!(
            hits,
            vec![
                Interval { start: 100, end: 200 },
                Interval { start: 150, end: 300 },
            ]
        );

        assert!(index.find("chr1", 300, 400).is_empty());
        assert!(index.find("chr3", 0, 1000).is_empty());
    }

    #[rstest]
    fn test_long_interval_behind_query_start() {
        // a long annotation starting well before the query must still be found
        let annotations = ProbeCatalog::from(vec![
            probe("chr1", 0, 10_000),
            probe("chr1", 5_000, 5_010),
        ]);
        let index = AnnotationIndex::build(&annotations);

        let hits = index.find("chr1", 9_000, 9_100);
        assert_eq!(hits, vec![Interval { start: 0, end: 10_000 }]);
    }

    #[rstest]
    fn test_intersect_length() {
        let interval = Interval { start: 100, end: 200 };
        assert_eq!(interval.intersect(150, 300), 50);
        assert_eq!(interval.intersect(0, 1000), 100);
        assert_eq!(interval.intersect(200, 300), 0);
    }
}
