//! Argument parsing and the single-image run.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use log::{debug, info, LevelFilter};
use sobel_core::decode::{decode_image, detect_format};
use sobel_core::encode::{encode_jpeg, DEFAULT_JPEG_QUALITY};
use sobel_core::{pipeline, MagnitudePolicy, PipelineOptions};

/// Magnitude narrowing as exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Magnitude {
    /// Keep the low 8 bits of large magnitudes
    Wrap,
    /// Clamp large magnitudes to 255
    Saturate,
}

impl From<Magnitude> for MagnitudePolicy {
    fn from(value: Magnitude) -> Self {
        match value {
            Magnitude::Wrap => MagnitudePolicy::Wrap,
            Magnitude::Saturate => MagnitudePolicy::Saturate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sobel",
    version,
    about = "Convert an image to grayscale, run Sobel edge detection and save it as JPEG"
)]
pub struct CliArgs {
    /// Input image (JPEG or PNG, detected by content)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Set output path
    #[arg(short, long, value_name = "PATH", default_value = "./output.jpg")]
    pub out: PathBuf,

    /// JPEG quality (1-100)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,

    /// How gradient magnitudes above 255 are written
    #[arg(long, value_enum, default_value_t = Magnitude::Wrap)]
    pub magnitude: Magnitude,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    pub fn options(&self) -> PipelineOptions {
        PipelineOptions {
            magnitude: self.magnitude.into(),
            quality: self.quality,
        }
    }
}

/// Check whether a parse failure means the wrong number of input files.
///
/// clap reports a surplus positional as an unknown argument, so an unknown
/// argument counts only when it does not look like a flag.
pub fn is_file_count_error(err: &clap::Error) -> bool {
    match err.kind() {
        ErrorKind::MissingRequiredArgument => true,
        ErrorKind::UnknownArgument => match err.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(arg)) => !arg.starts_with('-'),
            _ => false,
        },
        _ => false,
    }
}

/// Print a parse failure and choose the exit code.
///
/// Help and version requests exit 0; every other failure exits 1.
pub fn report_parse_error(err: clap::Error) -> ExitCode {
    if is_file_count_error(&err) {
        eprintln!("Error: Provide one input file\n");
        eprintln!("{}", CliArgs::command().render_help());
        return ExitCode::FAILURE;
    }

    // A closed stdout/stderr leaves nowhere to report the failure.
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install `env_logger`; `RUST_LOG` overrides the `-v` level.
pub fn init_logger(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .init();
}

/// Read, transform and write one image.
pub fn run(args: &CliArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("Failed to read input image: {}", args.file.display()))?;
    debug!(
        "read {} bytes from {} (format: {:?})",
        bytes.len(),
        args.file.display(),
        detect_format(&bytes)
    );

    let input = decode_image(&bytes)
        .with_context(|| format!("Failed to decode image: {}", args.file.display()))?;
    let (width, height) = input.dimensions();

    let options = args.options();
    let edges = pipeline::run(input, &options);
    let jpeg = encode_jpeg(&edges, options.quality).context("Failed to encode output image")?;

    fs::write(&args.out, jpeg)
        .with_context(|| format!("Failed to save output image: {}", args.out.display()))?;

    info!("wrote {} ({}x{})", args.out.display(), width, height);
    Ok(())
}
