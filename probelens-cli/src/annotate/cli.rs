use clap::{Arg, Command};

pub const ANNOTATE_CMD: &str = "annotate";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .about("Annotate a probe bed file with overlap and reciprocal-overlap fractions against one annotation track.")
        .arg(
            Arg::new("bed")
                .short('i')
                .long("bed")
                .help("Bed file to annotate")
                .required(true),
        )
        .arg(
            Arg::new("anno-bed")
                .short('a')
                .long("anno-bed")
                .help("Annotation bed file track")
                .required(true),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Name of the annotation, used for output columns and file name")
                .required(true),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .help("Output directory for <name>.PO.tsv")
                .required(true),
        )
}
