use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use probelens_annotate::combine_annotations;

pub fn run_combine(matches: &ArgMatches) -> Result<()> {
    let query_bed = matches
        .get_one::<String>("query-bed")
        .expect("A path to the query bed file is required.");
    let input_dir = matches
        .get_one::<String>("input-dir")
        .expect("A path to the annotation table directory is required.");
    let outname = matches
        .get_one::<String>("outname")
        .expect("An output file name is required.");

    combine_annotations(
        Path::new(query_bed),
        Path::new(input_dir),
        Path::new(outname),
    )?;
    println!("Wrote {}", outname);
    Ok(())
}
