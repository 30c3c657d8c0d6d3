//! `spellmark` - convert a JSON array of 5eTools spells to Obsidian markdown.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spellmark::config::Config;
use spellmark::export::{self, archive};

#[derive(Parser, Debug)]
#[command(name = "spellmark")]
#[command(version, about = "Convert a JSON array of D&D spells to Obsidian-friendly markdown.", long_about = None)]
struct Cli {
    /// Path to a JSON file containing a list/array of spells
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Directory to write markdown files into
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Do not create the spells-<version>.zip archive
    #[arg(long)]
    no_zip: bool,

    /// Directory to write the zip archive into
    #[arg(long, value_name = "DIR")]
    archive_dir: Option<PathBuf>,

    /// Log every file written
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(archive_dir) = self.archive_dir {
            config.archive_dir = archive_dir;
        }
        if self.no_zip {
            config.create_archive = false;
        }
    }

    const fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: &Config) -> anyhow::Result<()> {
    let spells = export::load_spells(&config.input)
        .with_context(|| format!("load spells from {}", config.input.display()))?;

    let report = export::export_spells(&spells, &config.output_dir)
        .with_context(|| format!("export to {}", config.output_dir.display()))?;

    export::write_version_file(&config.output_dir, config.app_version())
        .context("write version stamp")?;

    if config.create_archive {
        archive::create_archive(&config.output_dir, &config.archive_dir, config.app_version())
            .context("create zip archive")?;
    }

    println!(
        "Wrote {} spells to {}",
        report.written.len(),
        config.output_dir.display()
    );

    if !report.is_success() {
        for err in &report.failed {
            eprintln!("error: {err}");
        }
        bail!("{} of {} spells could not be written", report.failed.len(), spells.len());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.default_log_level());

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut config);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
