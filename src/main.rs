use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use svgshot::cdp::ChromeConverter;
use svgshot::{ConversionOptions, ConversionOutcome, ConversionRequest, RenderConfig};

/// Convert an SVG file to PNG using headless Chrome
#[derive(Parser, Debug)]
#[command(name = "svgshot", version, about, disable_help_flag = true)]
struct Cli {
    /// Input SVG file
    input: PathBuf,

    /// Output PNG file (defaults to the input path with a .png extension)
    output: Option<PathBuf>,

    /// Output width in pixels
    #[arg(short = 'w', long, allow_negative_numbers = true)]
    width: Option<f64>,

    /// Output height in pixels
    #[arg(short = 'h', long, allow_negative_numbers = true)]
    height: Option<f64>,

    /// Scale factor applied after width/height
    #[arg(short = 's', long, allow_negative_numbers = true)]
    scale: Option<f64>,

    /// Background color (CSS color or "transparent")
    #[arg(short = 'b', long, default_value = "transparent")]
    background: String,

    /// PNG quality 0-100 (accepted but not applied to the output)
    #[arg(short = 'q', long, default_value_t = 100.0, allow_negative_numbers = true)]
    quality: f64,

    /// Log progress to stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn request(&self) -> ConversionRequest {
        let mut request = ConversionRequest::new(&self.input).with_options(ConversionOptions {
            width: self.width,
            height: self.height,
            scale: self.scale,
            background: Some(self.background.clone()),
            quality: Some(self.quality),
        });
        if let Some(output) = &self.output {
            request = request.with_output(output);
        }
        request
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// First line of a clap error without its `error: ` prefix
fn usage_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

/// Help and version requests surface as clap errors but are not failures
fn is_informational(err: &clap::Error) -> bool {
    matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

fn usage_exit(err: clap::Error) -> ExitCode {
    if is_informational(&err) {
        let _ = err.print();
        return ExitCode::SUCCESS;
    }
    eprintln!("Error: {}", usage_message(&err));
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_exit(err),
    };
    init_logger(cli.verbose);

    let outcome = ChromeConverter::convert_once(RenderConfig::from_env(), &cli.request());

    match outcome {
        ConversionOutcome::Converted { output, dimensions } => {
            println!(
                "Converted {} -> {} ({})",
                cli.input.display(),
                output.display(),
                dimensions
            );
            ExitCode::SUCCESS
        }
        ConversionOutcome::Failed { error, .. } => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
