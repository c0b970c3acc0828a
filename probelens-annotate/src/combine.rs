use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fxhash::FxHashMap;
use glob::glob;

use probelens_core::utils::get_dynamic_reader;

/// The query BED's column names in the combined output. The upstream design
/// files carry gene, probe number and strand after the coordinates.
const QUERY_COLUMNS: [&str; 6] = ["chrom", "start", "end", "gene", "number", "strand"];

struct AnnotationTable {
    /// Column names after chrom/start/end, e.g. `segdup.PO`, `segdup.RPO`.
    extra_columns: Vec<String>,
    /// Rows keyed by the raw string triple `(chrom, start, end)`.
    rows: FxHashMap<String, Vec<String>>,
}

fn triple_key(fields: &[&str]) -> String {
    format!("{}\t{}\t{}", fields[0], fields[1], fields[2])
}

fn read_annotation_table(path: &Path) -> Result<AnnotationTable> {
    let reader = get_dynamic_reader(path)?;
    let mut lines = reader.lines();

    let header = lines
        .next()
        .with_context(|| format!("Annotation table is empty: {}", path.display()))??;
    let columns: Vec<&str> = header.split('\t').collect();
    if columns.len() < 4 {
        bail!(
            "Annotation table needs chrom, start, end and at least one value column: {}",
            path.display()
        );
    }

    let extra_columns: Vec<String> = columns[3..].iter().map(|c| c.to_string()).collect();
    let mut rows: FxHashMap<String, Vec<String>> = FxHashMap::default();

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').map(|f| f.trim()).collect();
        if fields.len() != columns.len() {
            bail!(
                "Annotation row does not match its header in {}: {}",
                path.display(),
                line
            );
        }
        rows.insert(
            triple_key(&fields),
            fields[3..].iter().map(|f| f.to_string()).collect(),
        );
    }

    Ok(AnnotationTable {
        extra_columns,
        rows,
    })
}

///
/// Left-join every annotation table (`<input_dir>/*.tsv`) onto the query
/// probe set, writing one combined TSV.
///
/// The join key is the raw string triple `(chrom, start, end)`; query rows
/// with no match in a given annotation source get `0` for that source's
/// columns. Every query row appears exactly once, in query-file order.
///
pub fn combine_annotations(query_bed: &Path, input_dir: &Path, out_path: &Path) -> Result<()> {
    // query rows, padded/truncated to the fixed column set
    let reader = get_dynamic_reader(query_bed)?;
    let mut query_rows: Vec<Vec<String>> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').map(|f| f.trim()).collect();
        if fields.len() < 3 {
            bail!("Query bed line has fewer than 3 fields: {}", line);
        }
        let mut row: Vec<String> = fields
            .iter()
            .take(QUERY_COLUMNS.len())
            .map(|f| f.to_string())
            .collect();
        row.resize(QUERY_COLUMNS.len(), "0".to_string());
        query_rows.push(row);
    }

    let pattern = input_dir.join("*.tsv");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("Input dir is not valid UTF-8: {}", input_dir.display()))?;
    let mut paths: Vec<PathBuf> = glob(pattern)?.filter_map(|entry| entry.ok()).collect();
    paths.sort();
    if paths.is_empty() {
        bail!("No annotation tables found in {}", input_dir.display());
    }

    let mut tables = Vec::with_capacity(paths.len());
    for path in &paths {
        tables.push(read_annotation_table(path)?);
    }

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(out_path)?);

    let mut header: Vec<&str> = QUERY_COLUMNS.to_vec();
    for table in &tables {
        header.extend(table.extra_columns.iter().map(String::as_str));
    }
    writeln!(writer, "{}", header.join("\t"))?;

    for row in &query_rows {
        let key = format!("{}\t{}\t{}", row[0], row[1], row[2]);
        let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
        for table in &tables {
            match table.rows.get(&key) {
                Some(extras) => cells.extend(extras.iter().map(String::as_str)),
                None => cells.extend(std::iter::repeat_n("0", table.extra_columns.len())),
            }
        }
        writeln!(writer, "{}", cells.join("\t"))?;
    }
    writer.flush()?;

    Ok(())
}
