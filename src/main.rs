//! oggbatch - Batch Ogg Vorbis Converter

use anyhow::Context;
use clap::Parser;
use log::debug;
use std::io;
use std::process;
use oggbatch::conversion::{BatchConverter, ProcessRunner};
use oggbatch::tool::{ToolLocator, executable_dir};
use oggbatch::{init_logging, Args, Config, ConvertError};

fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = run(args) {
        match e.downcast_ref::<ConvertError>() {
            Some(ConvertError::ToolNotFound { command, searched }) => {
                report_missing_tool(command, searched);
            }
            _ => eprintln!("Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_args_and_config(&args)?;

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    if config.verbose() {
        println!("{}", oggbatch::get_library_info());
        println!();
    }

    let base_dir = executable_dir()?;
    debug!("Local tool lookups relative to {}", base_dir.display());
    let tool = ToolLocator::new(&config, base_dir).resolve()?;

    println!("Using {}\n", tool);

    if args.check {
        return Ok(());
    }

    println!("Input folder: {}", config.input_dir.display());
    println!("Output folder: {}\n", config.output_dir.display());

    let mut converter = BatchConverter::from_config(&config, tool, ProcessRunner::new());
    let summary = converter
        .run(&mut io::stdout().lock())
        .with_context(|| format!("Batch conversion into {} failed", config.output_dir.display()))?;

    if !summary.all_succeeded() {
        debug!("{} of {} files failed to convert", summary.failed, summary.total);
    }

    Ok(())
}

fn report_missing_tool(command: &str, searched: &[std::path::PathBuf]) {
    eprintln!("ERROR: {} not found!", command);
    for path in searched {
        debug!("Searched: {}", path.display());
    }
    eprintln!("Please either:");
    eprintln!("  1. Install {} system-wide (recommended)", command);
    eprintln!("  2. Download {} and place it next to the oggbatch executable (or in its bin/ folder)", command);
    eprintln!("  3. Pass its location with --ffmpeg <PATH>");
}
