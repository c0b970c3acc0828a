use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::glob;

use crate::emit::MetricsTable;

/// The fixed name of the combined table, kept for pipeline compatibility.
pub const MERGED_FILE_NAME: &str = "outfile.txt";

///
/// Concatenate every per-chunk metrics table (`<input_dir>/*.csv`) into one
/// combined table at `<out_dir>/outfile.txt`.
///
/// Chunks are read in sorted path order for deterministic output; columns
/// are unioned by name, so chunks with differing schemas still merge.
///
pub fn merge_chunk_tables(input_dir: &Path, out_dir: &Path) -> Result<PathBuf> {
    let pattern = input_dir.join("*.csv");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("Input dir is not valid UTF-8: {}", input_dir.display()))?;

    let mut paths: Vec<PathBuf> = glob(pattern)?.filter_map(|entry| entry.ok()).collect();
    paths.sort();

    if paths.is_empty() {
        bail!("No chunk tables found in {}", input_dir.display());
    }

    let mut tables = Vec::with_capacity(paths.len());
    for path in &paths {
        let table = MetricsTable::read_csv(path)
            .with_context(|| format!("Failed to read chunk table: {}", path.display()))?;
        tables.push(table);
    }

    let combined = MetricsTable::concat(tables);
    let out_path = out_dir.join(MERGED_FILE_NAME);
    combined.write_csv(&out_path)?;

    Ok(out_path)
}
