use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use probelens_annotate::{annotate_overlap, write_overlap_tsv};
use probelens_core::ProbeCatalog;

pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
    let bed = matches
        .get_one::<String>("bed")
        .expect("A path to the bed file to annotate is required.");
    let anno_bed = matches
        .get_one::<String>("anno-bed")
        .expect("A path to the annotation bed file is required.");
    let name = matches
        .get_one::<String>("name")
        .expect("An annotation name is required.");
    let out_dir = matches
        .get_one::<String>("out-dir")
        .expect("An output directory is required.");

    let query = ProbeCatalog::try_from(Path::new(bed))?;
    let annotations = ProbeCatalog::try_from(Path::new(anno_bed))?;

    let rows = annotate_overlap(&query, &annotations);
    if rows.is_empty() {
        eprintln!("No overlaps found between {} and {}", bed, anno_bed);
    }

    let out_path = write_overlap_tsv(&rows, name, Path::new(out_dir))?;
    println!("Wrote {}", out_path.display());
    Ok(())
}
