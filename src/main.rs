// jack-analyzer: Jack source to bracketed parse tree

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::style::Stylize;

use jack_analyzer::analyzer::config::{DEFAULT_OUTPUT_EXTENSION, DEFAULT_SOURCE_EXTENSION};
use jack_analyzer::{analyze_path, AnalyzerConfig};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A .jack file, or a directory whose .jack files are analyzed
    path: PathBuf,

    /// Extension of source files picked up from a directory
    #[arg(long, default_value = DEFAULT_SOURCE_EXTENSION)]
    source_ext: String,

    /// Extension of the tree file written next to each source
    #[arg(long, default_value = DEFAULT_OUTPUT_EXTENSION)]
    output_ext: String,

    /// Also print every tree to stdout
    #[arg(long)]
    echo: bool,
}

impl From<&Args> for AnalyzerConfig {
    fn from(args: &Args) -> Self {
        AnalyzerConfig {
            source_extension: args.source_ext.clone(),
            output_extension: args.output_ext.clone(),
            echo: args.echo,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let config = AnalyzerConfig::from(&args);

    let outcomes = match analyze_path(&args.path, &config) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    if outcomes.is_empty() {
        eprintln!(
            "{} no .{} files in {}",
            "warning:".yellow().bold(),
            config.source_extension,
            args.path.display()
        );
    }

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(analysis) => {
                if config.echo {
                    print!("{}", analysis.tree);
                }
                eprintln!(
                    "{} {} -> {}",
                    "ok:".green().bold(),
                    outcome.source.display(),
                    analysis.output.display()
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}", "error:".red().bold(), e);
            }
        }
    }

    if failed > 0 {
        eprintln!("{} of {} file(s) failed", failed, outcomes.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
