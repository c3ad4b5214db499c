use chronobox_cli::commands::{
    Binary, BoxPair, Normalize, Parse, PredicateArgs, binary, intersect, normalize, parse,
    predicate, union,
};
use chronobox_cli::config::{self, get_config_element};
use chronobox_cli::error::Result;
use chronobox_cli::logging::init_logging;
use clap::{Parser, Subcommand};

/// Temporal and spatiotemporal bounding box utilities
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parses values and prints them in canonical form
    Parse(Parse),
    /// Merges periods into a sorted set of disjoint periods
    Normalize(Normalize),
    /// Intersects two values of the same kind, prints `empty` if they are disjoint
    Intersect(BoxPair),
    /// Unites two intersecting or adjacent values of the same kind
    Union(BoxPair),
    /// Evaluates a predicate on two values of the same kind
    Predicate(PredicateArgs),
    /// Converts values to and from their binary layout
    Binary(Binary),
}

fn run(cli: Cli) -> Result<String> {
    init_logging()?;

    let text_codec: config::TextCodec = get_config_element()?;
    let format = &text_codec.timestamp_format;

    match cli.command {
        Commands::Parse(params) => parse(params, format),
        Commands::Normalize(params) => normalize(params, format),
        Commands::Intersect(params) => intersect(params, format),
        Commands::Union(params) => union(params, format),
        Commands::Predicate(params) => predicate(params, format),
        Commands::Binary(params) => binary(params, format),
    }
}

#[allow(clippy::print_stdout, clippy::print_stderr)]
fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
