use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use imgsort_core::{Organizer, OrganizerConfig, ProgressObserver, RunReport, TRACE_ON};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

const BEGIN_BANNER: &str = "==========Begin==========";
const END_BANNER: &str = "==========End==========";

#[derive(Parser, Debug)]
#[command(
    name = "imgsort",
    version,
    about = "Copy images into one subfolder per base name"
)]
struct Cli {
    /// Path to the images folder
    #[arg(value_hint = clap::ValueHint::DirPath)]
    source: Option<PathBuf>,

    /// Use 'trace-on' to print every folder and copy step
    trace: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Suppress per-file warnings
    #[arg(long)]
    quiet: bool,

    /// Generate shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    if !cli.json {
        println!("{BEGIN_BANNER}");
    }

    let Some(source) = cli.source.as_deref() else {
        print_usage();
        return Ok(ExitCode::from(2));
    };

    let config = OrganizerConfig::new(source).with_trace_flag(cli.trace.as_deref());
    init_tracing(config.trace);

    let organizer = Organizer::prepare(config)
        .with_context(|| format!("cannot organize {}", source.display()))?;
    if !cli.quiet {
        for warning in &organizer.scan_warnings {
            eprintln!("warning: {}: {}", warning.path.display(), warning.message);
        }
    }

    let show_progress = !organizer.config.trace
        && !cli.quiet
        && !cli.json
        && std::io::stderr().is_terminal();
    let progress = if show_progress {
        let pb = ProgressBar::new(organizer.grouping.loaded as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("=>-"),
        );
        pb.set_message("copying");
        Some(pb)
    } else {
        None
    };

    let observer = progress.as_ref().map(|pb| CopyProgress { pb: pb.clone() });
    let report = organizer.run(observer.as_ref().map(|o| o as &dyn ProgressObserver));
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    if !cli.quiet {
        for warning in &report.placement.warnings {
            eprintln!("warning: {}: {}", warning.path.display(), warning.message);
        }
    }

    if cli.json {
        println!("{}", summary_json(&report)?);
    } else {
        print!("{}", summary_text(&report));
    }

    if report.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("imgsort_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(false)
        .without_time()
        .try_init();
}

fn print_usage() {
    println!("=====How to use=====");
    println!("arg 1*           - path to the images folder");
    println!("arg 2 (optional) - use '{TRACE_ON}' for tracing");
}

fn summary_text(report: &RunReport) -> String {
    let summary = &report.summary;
    format!(
        "\nResults:\n\
         Total number of loaded images: {}\n\
         Number of new images in folders: {}\n\
         Number of already existing images in folders: {}\n\
         \n{END_BANNER}\n",
        summary.loaded,
        summary.new_images(),
        summary.existing,
    )
}

fn summary_json(report: &RunReport) -> Result<String> {
    let value = serde_json::json!({
        "loaded": report.summary.loaded,
        "new": report.summary.new_images(),
        "existing": report.summary.existing,
        "folders_created": report.placement.folders_created,
        "failures": report.scan_warnings.len() + report.placement.warnings.len(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

struct CopyProgress {
    pb: ProgressBar,
}

impl ProgressObserver for CopyProgress {
    fn inc(&self, delta: u64) {
        self.pb.inc(delta);
    }
}
