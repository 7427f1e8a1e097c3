/*!
 * Command-line interface for digestfs
 */

use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use digestfs::config::{Args, IngestConfig};
use digestfs::ingest::ingest;
use digestfs::report::{ReportFormat, Reporter, ScanReport};
use digestfs::serialize;

fn main() -> digestfs::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config = IngestConfig::from_args(&args);

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg:.dim.white} ⏱️  {elapsed_precise}")
            .unwrap(),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_message(format!("📂 Ingesting directory: {}", args.root));

    let start_time = Instant::now();
    let digest = ingest(Path::new(&args.root), &config)?;
    let duration = start_time.elapsed();

    progress.finish_and_clear();

    let rendered = serialize::render(&digest, args.format)?;

    let destination = match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            path.clone()
        }
        None => {
            print!("{}", rendered);
            "stdout".to_string()
        }
    };

    let report = ScanReport {
        target: args.root.clone(),
        destination,
        duration,
        summary: digest.summary.clone(),
    };
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}
