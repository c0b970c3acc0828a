use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fxhash::FxHashSet;

use crate::overlap::AnnotationIndex;
use probelens_core::ProbeCatalog;

/// One annotated query interval: mean overlap fractions across every
/// annotation interval the query touches, rounded to 3 decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapRow {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
    pub po: f64,
    pub rpo: f64,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

///
/// Annotate each query interval with its overlap (`PO`) and reciprocal
/// overlap (`RPO`) fractions against one annotation track.
///
/// `PO` is overlap length over query length; `RPO` is overlap length over
/// annotation length. A query overlapping several annotations gets the mean
/// of each fraction. Queries with no overlap at all produce no row, the same
/// as a `bedtools intersect` hit list; duplicate query intervals collapse to
/// one row. Rows come back sorted by (chrom, start, end).
///
pub fn annotate_overlap(query: &ProbeCatalog, annotations: &ProbeCatalog) -> Vec<OverlapRow> {
    let index = AnnotationIndex::build(annotations);

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut rows: Vec<OverlapRow> = Vec::new();

    for probe in query {
        if probe.width() == 0 || !seen.insert(probe.key()) {
            continue;
        }

        let hits = index.find(&probe.chrom, probe.start, probe.end);
        if hits.is_empty() {
            continue;
        }

        let mut po_sum = 0.0;
        let mut rpo_sum = 0.0;
        for hit in &hits {
            let overlap = hit.intersect(probe.start, probe.end) as f64;
            po_sum += overlap / probe.width() as f64;
            rpo_sum += overlap / hit.width() as f64;
        }

        rows.push(OverlapRow {
            chrom: probe.chrom.clone(),
            start: probe.start,
            end: probe.end,
            po: round3(po_sum / hits.len() as f64),
            rpo: round3(rpo_sum / hits.len() as f64),
        });
    }

    rows.sort_by(|a, b| {
        (a.chrom.as_str(), a.start, a.end).cmp(&(b.chrom.as_str(), b.start, b.end))
    });
    rows
}

///
/// Write annotated rows as `<out_dir>/<anno_name>.PO.tsv` with the columns
/// `chrom`, `start`, `end`, `<anno_name>.PO`, `<anno_name>.RPO`.
///
pub fn write_overlap_tsv(
    rows: &[OverlapRow],
    anno_name: &str,
    out_dir: &Path,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let out_path = out_dir.join(format!("{}.PO.tsv", anno_name));

    let mut writer = BufWriter::new(File::create(&out_path)?);
    writeln!(
        writer,
        "chrom\tstart\tend\t{name}.PO\t{name}.RPO",
        name = anno_name
    )?;
    for row in rows {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            row.chrom, row.start, row.end, row.po, row.rpo
        )?;
    }
    writer.flush()?;

    Ok(out_path)
}
