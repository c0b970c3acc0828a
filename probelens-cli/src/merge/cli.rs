use clap::{Arg, Command};

pub const MERGE_CMD: &str = "merge";

pub fn create_merge_cli() -> Command {
    Command::new(MERGE_CMD)
        .about("Concatenate per-chunk metrics tables into one combined table.")
        .arg(
            Arg::new("input-dir")
                .short('i')
                .long("input-dir")
                .help("Directory holding the per-chunk .csv tables")
                .required(true),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .help("Output directory for outfile.txt")
                .required(true),
        )
}
