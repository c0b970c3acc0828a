use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use noodles::bam;
use noodles::core::{Position, Region};
use noodles::sam::alignment::RecordBuf;
use rayon::prelude::*;

use crate::accumulate::MetricAccumulator;
use crate::classify::{ClassifiedRecord, classify};
use crate::emit::MetricsTable;
use crate::stats::{ProbeStats, StatMode, reduce};
use probelens_core::{Probe, ProbeCatalog};

/// The result of scanning one catalog entry. Tasks own their scan state;
/// the only synchronization point is the sequential merge at the end.
struct ProbeScan {
    key: String,
    records: Vec<ClassifiedRecord>,
    depth: u64,
    skipped: u64,
}

///
/// Scan one probe's alignments from an indexed BAM file.
///
/// The reader handle is opened once per task, not once per record; the
/// indexed reader is not shareable across concurrent queries, so each
/// worker holds its own.
///
/// You must provide a .bai file alongside the bam file! Create one:
/// `samtools index your_file.bam`
///
fn scan_probe(bam_path: &Path, probe: &Probe) -> Result<ProbeScan> {
    let mut reader = bam::io::indexed_reader::Builder::default()
        .build_from_path(bam_path)
        .with_context(|| {
            format!(
                "Failed to open indexed bam (missing .bai?): {}",
                bam_path.display()
            )
        })?;
    let header = reader.read_header()?;

    // BED half-open to 1-based inclusive coordinates
    let start = Position::try_from(probe.start as usize + 1)
        .with_context(|| format!("Invalid start coordinate for probe {}", probe.key()))?;
    let end = Position::try_from(probe.end as usize)
        .with_context(|| format!("Invalid end coordinate for probe {}", probe.key()))?;
    let region = Region::new(probe.chrom.clone(), start..=end);

    let query = reader
        .query(&header, &region)
        .with_context(|| format!("Failed to query region {} from the bam index", region))?;

    let mut records = Vec::new();
    let mut depth = 0;
    let mut skipped = 0;

    for result in query {
        let record = result?;
        // depth counts every fetched record, classified or not
        depth += 1;

        let record = RecordBuf::try_from_alignment_record(&header, &record)?;
        match classify(&record) {
            Ok(classified) => records.push(classified),
            Err(_) => skipped += 1,
        }
    }

    Ok(ProbeScan {
        key: probe.key(),
        records,
        depth,
        skipped,
    })
}

///
/// Compute per-probe alignment metrics over an indexed BAM file and write
/// them to `<out_dir>/<sample_name>.metrics.csv`.
///
/// Probes are scanned in parallel, one rayon task per catalog entry; a
/// single collector then merges the partial results sequentially in catalog
/// order, so duplicate probes accumulate into one bucket deterministically.
/// Per-record classification failures are absorbed (the record is dropped,
/// depth still counts it); structural failures (unreadable BAM, missing
/// index, unknown chromosome) abort the run.
///
pub fn extract_metrics(
    bam_path: &Path,
    catalog: &ProbeCatalog,
    sample_name: &str,
    out_dir: &Path,
    mode: StatMode,
    num_threads: usize,
) -> Result<PathBuf> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()?;

    let bar = ProgressBar::new(catalog.len() as u64);

    let scans: Vec<ProbeScan> = pool.install(|| {
        catalog
            .probes
            .par_iter()
            .map(|probe| {
                let scan = scan_probe(bam_path, probe);
                bar.inc(1);
                scan
            })
            .collect::<Result<Vec<_>>>()
    })?;
    bar.finish_and_clear();

    let mut acc = MetricAccumulator::new();
    let mut skipped = 0;
    for scan in scans {
        acc.observe(&scan.key);
        for classified in scan.records {
            acc.record(&scan.key, classified);
        }
        acc.set_depth(&scan.key, scan.depth);
        skipped += scan.skipped;
    }

    if skipped > 0 {
        eprintln!("Dropped {} records with no AS tag", skipped);
    }

    let entries: Vec<(String, ProbeStats)> = acc
        .iter()
        .map(|(key, records, depth)| (key.to_string(), reduce(records, depth, mode)))
        .collect();

    let table = MetricsTable::from_probe_stats(&entries, sample_name);
    let out_path = out_dir.join(format!("{}.metrics.csv", sample_name));
    table.write_csv(&out_path)?;

    Ok(out_path)
}
