use std::path::PathBuf;
use std::process::ExitCode;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use clap::Parser;

use icon_variants::config::{DEFAULT_DARK_DIR, DEFAULT_LIGHT_DIR, DEFAULT_SOURCE_DIR};
use icon_variants::{
    logging, FailurePolicy, GeneratorConfig, IconVariantGenerator, Progress, RunReport,
    UnsupportedPolicy,
};

#[derive(Parser)]
#[command(
    name = "icon-variants",
    about = "Copy icons into a light folder and write color-inverted copies into a dark folder",
    version
)]
struct Cli {
    /// Folder holding the source icons
    #[arg(default_value = DEFAULT_SOURCE_DIR)]
    source: PathBuf,

    /// Output folder for unmodified copies
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_LIGHT_DIR)]
    light: PathBuf,

    /// Output folder for inverted copies
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_DARK_DIR)]
    dark: PathBuf,

    /// Comma-separated extensions to process (default: png,jpg,jpeg,bmp)
    #[arg(short, long, value_name = "EXT,...", value_delimiter = ',')]
    extensions: Option<Vec<String>>,

    /// Keep processing after a file fails and report failures at the end
    #[arg(short, long)]
    keep_going: bool,

    /// Warn about files skipped because of their extension
    #[arg(short, long)]
    warn_unsupported: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let report = match run(cli) {
        Ok(report) => report,
        Err(err) => {
            // Display, not Debug: the error messages already name the file.
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Done!");

    if report.is_success() {
        return ExitCode::SUCCESS;
    }
    eprintln!(
        "{} of {} file(s) failed:",
        report.failed.len(),
        report.failed.len() + report.processed.len()
    );
    for failure in &report.failed {
        eprintln!("  {}", failure.file_name);
    }
    ExitCode::FAILURE
}

fn run(cli: Cli) -> icon_variants::Result<RunReport> {
    let mut config = GeneratorConfig::new(cli.source, cli.light, cli.dark)
        .with_failure_policy(if cli.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        })
        .with_unsupported_policy(if cli.warn_unsupported {
            UnsupportedPolicy::Warn
        } else {
            UnsupportedPolicy::Skip
        });
    if let Some(extensions) = cli.extensions {
        config = config.with_extensions(extensions);
    }

    IconVariantGenerator::new(config)?.run(|event| match event {
        Progress::Processed { file_name } => println!("Processed: {file_name}"),
        Progress::Failed { file_name, error } => eprintln!("Failed: {file_name}: {error}"),
    })
}
