mod coord;
mod document;
mod enrich;
mod error;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "data_enhanced.json";

#[derive(Debug, Parser)]
#[clap(
  name = "path_labeler",
  about = "Copy labels from reference points onto matching path points",
  version
)]
struct Cli {
  /// Input document
  #[clap(value_parser, default_value = "data.json")]
  input: PathBuf,

  /// Output document [default: data_enhanced.json]
  #[clap(value_parser)]
  output: Option<PathBuf>,

  /// Rewrite the input document instead of writing a separate output
  #[clap(long, action, conflicts_with = "output")]
  in_place: bool,

  /// Log debug details
  #[clap(short, long, action, conflicts_with = "quiet")]
  verbose: bool,

  /// Only log warnings and errors
  #[clap(short, long, action)]
  quiet: bool,
}

fn init_logger(args: &Cli) {
  let mut builder =
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
  if args.quiet {
    builder.filter_level(LevelFilter::Warn);
  } else if args.verbose {
    builder.filter_level(LevelFilter::Debug);
  }
  builder.target(env_logger::Target::Stderr).init();
}

fn main() -> Result<()> {
  let args = Cli::parse();
  init_logger(&args);

  let output = if args.in_place {
    args.input.clone()
  } else {
    args
      .output
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
  };

  info!("Reading document from {}", args.input.display());
  let mut document = document::read_document(&args.input)?;

  let stats = enrich::enrich(&mut document)
    .with_context(|| format!("failed to enrich {}", args.input.display()))?;
  info!(
    "Labeled {} of {} path points from {} reference points",
    stats.labeled, stats.path_points, stats.reference_points
  );

  document::write_document(&output, &document)?;
  println!("Enhanced JSON written to {}", output.display());
  Ok(())
}
