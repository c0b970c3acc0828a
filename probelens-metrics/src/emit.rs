use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use fxhash::FxHashMap;

use crate::errors::MetricsError;
use crate::stats::ProbeStats;
use probelens_core::utils::get_dynamic_reader;

///
/// A row-oriented metrics table with a stable column set.
///
/// Columns are the union of everything seen across rows, in first-seen
/// order; a row missing a column serializes as an empty cell, never a zero.
/// Row order is first-seen probe insertion order, not sorted.
///
#[derive(Debug, Clone, Default)]
pub struct MetricsTable {
    pub columns: Vec<String>,
    pub rows: Vec<FxHashMap<String, String>>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_column(&mut self, name: &str) {
        if !self.columns.iter().any(|c| c == name) {
            self.columns.push(name.to_string());
        }
    }

    ///
    /// Build the output table from reduced per-probe statistics.
    ///
    /// The `probe` column carries the interval key; `SAMPLE_NAME` is the
    /// sample identifier truncated at its first `.` and always sits last.
    /// A `raw_dp` of zero is rendered as the literal `True`, a quirk of the
    /// historical output encoding that downstream consumers rely on.
    ///
    pub fn from_probe_stats(entries: &[(String, ProbeStats)], sample_name: &str) -> Self {
        let sample = sample_name.split('.').next().unwrap_or(sample_name);

        let mut table = MetricsTable::new();
        table.ensure_column("probe");

        for (key, stats) in entries {
            let mut row: FxHashMap<String, String> = FxHashMap::default();
            row.insert("probe".to_string(), key.clone());

            for (name, value) in &stats.stats {
                table.ensure_column(name);
                row.insert(name.clone(), format!("{}", value));
            }

            table.ensure_column("raw_dp");
            let raw_dp = match stats.raw_dp {
                0 => "True".to_string(),
                n => n.to_string(),
            };
            row.insert("raw_dp".to_string(), raw_dp);

            row.insert("SAMPLE_NAME".to_string(), sample.to_string());
            table.rows.push(row);
        }

        // last column, after every statistic column has been unioned in
        table.ensure_column("SAMPLE_NAME");
        table
    }

    /// Concatenate tables row-wise, unioning columns by name.
    pub fn concat(tables: Vec<MetricsTable>) -> Self {
        let mut combined = MetricsTable::new();
        for table in tables {
            for column in &table.columns {
                combined.ensure_column(column);
            }
            combined.rows.extend(table.rows);
        }
        combined
    }

    ///
    /// Write the table as comma-separated values, header included, no index
    /// column.
    ///
    pub fn write_csv<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "{}", self.columns.join(","))?;

        for row in &self.rows {
            let cells: Vec<&str> = self
                .columns
                .iter()
                .map(|column| row.get(column).map(String::as_str).unwrap_or(""))
                .collect();
            writeln!(writer, "{}", cells.join(","))?;
        }

        writer.flush()
    }

    ///
    /// Read a table previously written by [`MetricsTable::write_csv`].
    /// Empty cells stay absent from the row map, so re-concatenation keeps
    /// union-by-name semantics.
    ///
    pub fn read_csv<T: AsRef<Path>>(path: T) -> Result<Self, MetricsError> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)
            .map_err(|e| MetricsError::Io(std::io::Error::other(e.to_string())))?;

        let mut lines = reader.lines();
        let header = lines.next().ok_or_else(|| MetricsError::MalformedTable {
            path: path.display().to_string(),
            reason: "missing header".to_string(),
        })??;

        let columns: Vec<String> = header.split(',').map(|c| c.to_string()).collect();
        let mut rows = Vec::new();

        for line in lines {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split(',').collect();
            if cells.len() != columns.len() {
                return Err(MetricsError::MalformedTable {
                    path: path.display().to_string(),
                    reason: format!(
                        "row has {} cells, header has {} columns",
                        cells.len(),
                        columns.len()
                    ),
                });
            }

            let mut row: FxHashMap<String, String> = FxHashMap::default();
            for (column, cell) in columns.iter().zip(cells) {
                if !cell.is_empty() {
                    row.insert(column.clone(), cell.to_string());
                }
            }
            rows.push(row);
        }

        Ok(MetricsTable { columns, rows })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;
    use crate::stats::ProbeStats;

    fn stats(names_values: &[(&str, f64)], raw_dp: u64) -> ProbeStats {
        ProbeStats {
            stats: names_values
                .iter()
                .map(|(n, v)| (n.to_string(), *v))
                .collect(),
            raw_dp,
        }
    }

    #[rstest]
    fn test_zero_depth_renders_as_true() {
        let entries = vec![("chr1_0_5".to_string(), stats(&[], 0))];
        let table = MetricsTable::from_probe_stats(&entries, "sampleA.chunk1");

        assert_eq!(table.columns, vec!["probe", "raw_dp", "SAMPLE_NAME"]);
        assert_eq!(table.rows[0]["raw_dp"], "True");
        assert_eq!(table.rows[0]["SAMPLE_NAME"], "sampleA");
    }

    #[rstest]
    fn test_column_union_keeps_first_seen_order_and_sample_last() {
        let entries = vec![
            ("chr1_0_5".to_string(), stats(&[("AS_median", 10.0)], 4)),
            (
                "chr1_5_9".to_string(),
                stats(&[("AS_median", 12.0), ("XS_median", 3.0)], 2),
            ),
        ];
        let table = MetricsTable::from_probe_stats(&entries, "s1.bam");

        assert_eq!(
            table.columns,
            vec!["probe", "AS_median", "raw_dp", "XS_median", "SAMPLE_NAME"]
        );
        // row one never saw XS_median: empty cell, not zero
        assert_eq!(table.rows[0].get("XS_median"), None);
    }

    #[rstest]
    fn test_csv_round_trip_recovers_key_and_depth() {
        let entries = vec![
            ("chr1_0_5".to_string(), stats(&[("MAPQ_median", 60.0)], 12)),
            ("chr2_7_9".to_string(), stats(&[], 0)),
        ];
        let table = MetricsTable::from_probe_stats(&entries, "s2");

        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("s2.metrics.csv");
        table.write_csv(&path).unwrap();

        let read_back = MetricsTable::read_csv(&path).unwrap();
        assert_eq!(read_back.columns, table.columns);

        let pairs: Vec<(String, String)> = read_back
            .rows
            .iter()
            .map(|r| (r["probe"].clone(), r["raw_dp"].clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("chr1_0_5".to_string(), "12".to_string()),
                ("chr2_7_9".to_string(), "True".to_string()),
            ]
        );
    }

    #[rstest]
    fn test_read_csv_rejects_ragged_rows() {
        use std::io::Write;

        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("bad.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "probe,raw_dp").unwrap();
        writeln!(file, "chr1_0_5,3,extra").unwrap();

        let result = MetricsTable::read_csv(&path);
        assert!(matches!(
            result,
            Err(MetricsError::MalformedTable { .. })
        ));
    }
}
