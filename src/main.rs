use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;

use reading_level::input::{self, InquirePrompt};
use reading_level::{report, ReadabilityError, DEFAULT_REPORT_PATH, DEFAULT_TOP_N};

#[derive(Parser)]
#[command(
    name = "reading-level",
    about = "Flesch reading ease, grade level and top words for a text file",
    version
)]
struct Cli {
    /// Text file to analyze (prompts for one if omitted)
    file: Option<PathBuf>,

    /// How many of the most frequent words to report
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N, env = "READING_LEVEL_TOP_N")]
    top_n: usize,

    /// Where to write the CSV report
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH, env = "READING_LEVEL_REPORT")]
    output: PathBuf,

    /// Print the analysis as JSON instead of the console summary
    #[arg(long)]
    json: bool,

    /// A level of verbosity, and can be used multiple times
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let path = match &cli.file {
        Some(path) => path.clone(),
        None => input::prompt_for_existing_file(&InquirePrompt)?,
    };

    let lines = input::read_lines(&path)?;
    let analysis = reading_level::analyze_lines(&lines, cli.top_n)?;

    report::write_report(&cli.output, &analysis)
        .with_context(|| format!("writing report to {}", cli.output.display()))?;

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &analysis)?;
        writeln!(stdout)?;
    } else {
        report::print_summary(&mut stdout, &analysis.metrics, &analysis.scores)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.level_filter())
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ReadabilityError>() {
                Some(ReadabilityError::DegenerateCorpus { .. }) => {
                    eprintln!("ERROR:  Can not compute metrics without words.");
                }
                Some(ReadabilityError::MissingInputFile { path }) => {
                    eprintln!("SORRY, the file {} does not exist.", path.display());
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
