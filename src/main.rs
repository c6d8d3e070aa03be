//! CLI for the ISA layout search engine.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use isa_layout::error::{LayoutError, Result};
use isa_layout::{formatter, header, input, logging, priority, reserved, search};

/// What to echo to stdout once the best layout has been found and its
/// JSON written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Search for the fixed-width instruction encoding that minimizes
/// reserved bits, given a field and format description.
#[derive(Debug, Parser)]
#[command(name = "isa-layout", version, about)]
struct Args {
    /// Path to the ISA description file (JSON).
    input: PathBuf,

    /// Log intermediate candidate layouts as the search explores them.
    #[arg(short, long)]
    verbose: bool,

    /// Override the output JSON path (default: `output_<input filename>`
    /// alongside the input file).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Which emitter's result to print to stdout.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut model = input::parse_file(&args.input)?;
    let length = model.length.bits();

    priority::assign_priorities(&mut model.fields, &model.formats);
    header::place_headers(&mut model.formats, length)?;

    let best = search::run_search(&model.fields, &mut model.formats, length);
    let Some(mut best_formats) = best else {
        return Err(LayoutError::Infeasibility);
    };
    reserved::fill_reserved(&mut best_formats, length);

    let used_bits = length * best_formats.len() as u32 - reserved::total_reserved_width(&best_formats);
    let text = formatter::render_text(
        &best_formats,
        length,
        &format!("BEST ISA FOUND ({used_bits} used bits):"),
    );
    tracing::info!("{text}");

    let entries = formatter::build_output(&best_formats)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| formatter::output_path_for(&args.input));
    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(&output_path, &json)?;
    tracing::info!(path = %output_path.display(), "wrote output");

    match args.format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => println!("{json}"),
    }

    Ok(())
}
