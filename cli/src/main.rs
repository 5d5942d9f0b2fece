//! pdfmd CLI - PDF to Markdown reconstruction tool

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfmd::{convert_bytes_with_progress, ConvertOptions, HeadingSensitivity};

#[derive(Parser)]
#[command(name = "pdfmd")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Reconstruct structured Markdown from a PDF file", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Heading detection sensitivity
    #[arg(long, value_enum, default_value = "medium")]
    sensitivity: Sensitivity,

    /// Disable list detection
    #[arg(long)]
    no_lists: bool,

    /// Disable `---` separators between pages
    #[arg(long)]
    no_page_breaks: bool,

    /// Vertical tolerance for line grouping, in PDF units
    #[arg(long, value_name = "UNITS")]
    line_tolerance: Option<f32>,

    /// Print conversion statistics as JSON to stderr
    #[arg(long)]
    stats: bool,

    /// Suppress the progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Sensitivity {
    /// Fewer headings: only clearly oversized lines qualify
    Low,
    /// Balanced detection (default)
    Medium,
    /// More headings: mildly enlarged lines qualify
    High,
}

impl From<Sensitivity> for HeadingSensitivity {
    fn from(level: Sensitivity) -> Self {
        match level {
            Sensitivity::Low => HeadingSensitivity::Low,
            Sensitivity::Medium => HeadingSensitivity::Medium,
            Sensitivity::High => HeadingSensitivity::High,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ConvertOptions::new()
        .with_sensitivity(cli.sensitivity.into())
        .with_lists(!cli.no_lists)
        .with_page_breaks(!cli.no_page_breaks);
    if let Some(tolerance) = cli.line_tolerance {
        options = options.with_line_tolerance(tolerance);
    }

    let data = fs::read(&cli.input)?;

    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] page {pos}/{len}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    let result = convert_bytes_with_progress(&data, &options, |page, total| {
        pb.set_length(total as u64);
        pb.set_position(page as u64);
    })?;
    pb.finish_and_clear();

    if let Some(path) = &cli.output {
        fs::write(path, &result.markdown)?;
        if !cli.quiet {
            println!("{} {}", "Saved to".green(), path.display());
        }
    } else {
        println!("{}", result.markdown);
    }

    if cli.stats {
        eprintln!("{}", serde_json::to_string_pretty(&result.stats)?);
    } else if !cli.quiet {
        eprintln!(
            "{} {} pages, {} words, {} headings, {} list items",
            "Done!".green().bold(),
            result.stats.pages,
            result.stats.words,
            result.stats.headings,
            result.stats.lists
        );
    }

    Ok(())
}
