use clap::{Arg, Command, arg, value_parser};

pub const EXTRACT_CMD: &str = "extract";

pub fn create_extract_cli() -> Command {
    Command::new(EXTRACT_CMD)
        .about("Compute per-probe alignment metrics over an indexed bam file.")
        .arg(
            Arg::new("bam")
                .short('i')
                .long("bam")
                .help("Coordinate-sorted, indexed bam file (.bai alongside)")
                .required(true),
        )
        .arg(
            Arg::new("bed")
                .short('b')
                .long("bed")
                .help("Probe bed file (chrom, start, end)")
                .required(true),
        )
        .arg(
            Arg::new("sample")
                .short('s')
                .long("sample")
                .help("Sample name; the output SAMPLE_NAME column truncates it at the first '.'")
                .required(true),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .help("Output directory for <sample>.metrics.csv")
                .required(true),
        )
        .arg(
            arg!(--mode <mode>)
                .help("Statistic set: 'median' for medians only, 'full' for median/mean/std/min plus MAPQ threshold counts")
                .default_value("full"),
        )
        .arg(
            arg!(--threads <threads>)
                .help("Number of worker threads, one probe per task")
                .value_parser(value_parser!(usize))
                .default_value("4"),
        )
}
