use crate::classify::{ClassifiedRecord, MetricField};

/// Which statistic set to compute per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatMode {
    /// One bare `{field}` column per field, holding the median.
    MedianOnly,
    /// `{field}_median`, `{field}_mean`, `{field}_std`, `{field}_min` per
    /// field, plus the MAPQ-threshold columns.
    Full,
}

impl std::str::FromStr for StatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "median" => Ok(StatMode::MedianOnly),
            "full" | "summary" => Ok(StatMode::Full),
            _ => Err(format!("Unknown stat mode: {}", s)),
        }
    }
}

/// The reduced statistics for one probe. `stats` keeps its insertion order;
/// that order becomes the column order of the output table. `raw_dp` stays a
/// plain integer here; the zero-to-`True` rendering quirk is applied at the
/// emission boundary only.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeStats {
    pub stats: Vec<(String, f64)>,
    pub raw_dp: u64,
}

fn median(values: &[i64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

fn mean(values: &[i64]) -> f64 {
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// Population standard deviation (ddof = 0).
fn std_dev(values: &[i64]) -> f64 {
    let m = mean(values);
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - m;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

fn min(values: &[i64]) -> f64 {
    *values.iter().min().unwrap() as f64
}

///
/// Reduce one probe's classified records to its statistic set.
///
/// Records are transposed into per-field series first: a field contributes
/// to its series only when present on a record, so the series are ragged
/// (the `AS` series can be longer than the `XS` series). Statistics are only
/// ever computed over non-empty series; a probe with zero classified records
/// yields no statistic columns at all, just `raw_dp`.
///
pub fn reduce(records: &[ClassifiedRecord], raw_dp: u64, mode: StatMode) -> ProbeStats {
    let series: Vec<(MetricField, Vec<i64>)> = MetricField::ALL
        .iter()
        .map(|&field| {
            (
                field,
                records.iter().filter_map(|r| r.get(field)).collect::<Vec<i64>>(),
            )
        })
        .filter(|(_, values)| !values.is_empty())
        .collect();

    let mut stats: Vec<(String, f64)> = Vec::new();

    match mode {
        StatMode::MedianOnly => {
            for (field, values) in &series {
                stats.push((field.as_str().to_string(), median(values)));
            }
        }
        StatMode::Full => {
            for (field, values) in &series {
                stats.push((format!("{}_median", field.as_str()), median(values)));
            }
            for (field, values) in &series {
                stats.push((format!("{}_mean", field.as_str()), mean(values)));
            }
            for (field, values) in &series {
                stats.push((format!("{}_std", field.as_str()), std_dev(values)));
            }
            for (field, values) in &series {
                stats.push((format!("{}_min", field.as_str()), min(values)));
            }

            if !records.is_empty() {
                let mapq: Vec<i64> = records.iter().map(|r| r.mapq).collect();
                let lt10 = mapq.iter().filter(|&&v| v < 10).count();
                // guard: an empty MAPQ series yields 0, never a division by zero
                let pct = if mapq.is_empty() {
                    0.0
                } else {
                    100.0 * lt10 as f64 / mapq.len() as f64
                };
                stats.push(("pct_count_mapq_lt10".to_string(), pct));
                stats.push(("count_mapq_lt10".to_string(), lt10 as f64));
            }
        }
    }

    ProbeStats { stats, raw_dp }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;
    use crate::classify::ClassifiedRecord;

    fn record(mapq: i64, score: i64, xs: Option<i64>) -> ClassifiedRecord {
        ClassifiedRecord {
            insert_size: score * 10,
            proper_pair: 1,
            mapq,
            alignment_score: score,
            secondary_score: xs,
            mate_mapq: None,
        }
    }

    fn lookup(stats: &ProbeStats, name: &str) -> Option<f64> {
        stats
            .stats
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    #[rstest]
    fn test_basic_statistics() {
        let values = [10, 20, 30];
        assert_eq!(median(&values), 20.0);
        assert_eq!(mean(&values), 20.0);
        assert!((std_dev(&values) - 8.16496580927726).abs() < 1e-9);
        assert_eq!(min(&values), 10.0);
    }

    #[rstest]
    fn test_even_length_median() {
        assert_eq!(median(&[1, 2, 3, 4]), 2.5);
    }

    #[rstest]
    fn test_pct_mapq_lt10() {
        let records = vec![record(5, 1, None), record(15, 2, None), record(8, 3, None)];
        let stats = reduce(&records, 3, StatMode::Full);

        assert_eq!(lookup(&stats, "count_mapq_lt10"), Some(2.0));
        let pct = lookup(&stats, "pct_count_mapq_lt10").unwrap();
        assert!((pct - 200.0 / 3.0).abs() < 1e-12);
    }

    #[rstest]
    fn test_empty_bucket_has_no_stat_columns() {
        let stats = reduce(&[], 0, StatMode::Full);
        assert!(stats.stats.is_empty());
        assert_eq!(stats.raw_dp, 0);
    }

    #[rstest]
    fn test_ragged_series() {
        // XS on only one of two records: its series has length 1
        let records = vec![record(60, 10, Some(7)), record(60, 20, None)];
        let stats = reduce(&records, 2, StatMode::Full);

        assert_eq!(lookup(&stats, "AS_median"), Some(15.0));
        assert_eq!(lookup(&stats, "XS_median"), Some(7.0));
        assert_eq!(lookup(&stats, "XS_min"), Some(7.0));
        // MQ never appeared: no columns for it at all
        assert_eq!(lookup(&stats, "MQ_median"), None);
    }

    #[rstest]
    fn test_median_only_mode_uses_bare_names() {
        let records = vec![record(60, 10, None)];
        let stats = reduce(&records, 1, StatMode::MedianOnly);

        assert_eq!(lookup(&stats, "MAPQ"), Some(60.0));
        assert_eq!(lookup(&stats, "AS"), Some(10.0));
        assert_eq!(lookup(&stats, "MAPQ_median"), None);
        assert_eq!(lookup(&stats, "count_mapq_lt10"), None);
    }

    #[rstest]
    fn test_negative_insert_sizes_survive() {
        let mut a = record(60, 10, None);
        a.insert_size = -300;
        let mut b = record(60, 10, None);
        b.insert_size = -100;
        let stats = reduce(&[a, b], 2, StatMode::Full);

        assert_eq!(lookup(&stats, "isize_median"), Some(-200.0));
        assert_eq!(lookup(&stats, "isize_min"), Some(-300.0));
    }
}
