use clap::{Arg, Command};

pub const COMBINE_CMD: &str = "combine";

pub fn create_combine_cli() -> Command {
    Command::new(COMBINE_CMD)
        .about("Left-join annotation overlap tables onto a query bed file.")
        .arg(
            Arg::new("query-bed")
                .short('q')
                .long("query-bed")
                .help("Query bed file used for the analysis")
                .required(true),
        )
        .arg(
            Arg::new("input-dir")
                .short('i')
                .long("input-dir")
                .help("Directory holding the per-annotation .tsv tables")
                .required(true),
        )
        .arg(
            Arg::new("outname")
                .short('o')
                .long("outname")
                .help("Path of the combined output file")
                .required(true),
        )
}
