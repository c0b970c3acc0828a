mod annotate;
mod combine;
mod extract;
mod merge;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "probelens";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Per-probe alignment metric extraction from indexed BAM files, with overlap annotation of probe sets against stratification tracks.")
        .subcommand_required(true)
        .subcommand(extract::cli::create_extract_cli())
        .subcommand(merge::cli::create_merge_cli())
        .subcommand(annotate::cli::create_annotate_cli())
        .subcommand(combine::cli::create_combine_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // EXTRACT
        //
        Some((extract::cli::EXTRACT_CMD, matches)) => {
            extract::handlers::run_extract(matches)?;
        }

        //
        // MERGE
        //
        Some((merge::cli::MERGE_CMD, matches)) => {
            merge::handlers::run_merge(matches)?;
        }

        //
        // ANNOTATE
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        //
        // COMBINE
        //
        Some((combine::cli::COMBINE_CMD, matches)) => {
            combine::handlers::run_combine(matches)?;
        }

        _ => unreachable!("clap should ensure we don't get here"),
    };

    Ok(())
}
