use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use clap::ArgMatches;

use probelens_core::ProbeCatalog;
use probelens_metrics::{StatMode, extract_metrics};

pub fn run_extract(matches: &ArgMatches) -> Result<()> {
    let bam = matches
        .get_one::<String>("bam")
        .expect("A path to a bam file is required.");
    let bed = matches
        .get_one::<String>("bed")
        .expect("A path to a probe bed file is required.");
    let sample = matches
        .get_one::<String>("sample")
        .expect("A sample name is required.");
    let out_dir = matches
        .get_one::<String>("out-dir")
        .expect("An output directory is required.");

    let mode = match matches.get_one::<String>("mode") {
        Some(mode) => match StatMode::from_str(mode) {
            Ok(mode) => mode,
            Err(_err) => anyhow::bail!("Unknown stat mode supplied: {}", mode),
        },
        None => StatMode::Full,
    };
    let threads = *matches.get_one::<usize>("threads").unwrap_or(&4);

    let catalog = ProbeCatalog::try_from(Path::new(bed))?;
    let out_path = extract_metrics(
        Path::new(bam),
        &catalog,
        sample,
        &PathBuf::from(out_dir),
        mode,
        threads,
    )?;

    println!("Wrote {}", out_path.display());
    Ok(())
}
