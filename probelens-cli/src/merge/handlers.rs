use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use probelens_metrics::merge_chunk_tables;

pub fn run_merge(matches: &ArgMatches) -> Result<()> {
    let input_dir = matches
        .get_one::<String>("input-dir")
        .expect("A path to the chunk directory is required.");
    let out_dir = matches
        .get_one::<String>("out-dir")
        .expect("An output directory is required.");

    let out_path = merge_chunk_tables(Path::new(input_dir), Path::new(out_dir))?;
    println!("Wrote {}", out_path.display());
    Ok(())
}
