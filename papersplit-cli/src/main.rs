use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

// Import from papersplit-core
use papersplit_core::{PaperSplitter, Region, SplitConfig, SplitOutcome};

// Import CLI utilities
use papersplit_cli::SplitReport;

#[derive(Parser, Debug)]
#[command(name = "papersplit")]
#[command(about = "Split a Markdown academic paper into main, backmatter, and appendix files")]
struct Args {
    /// Path to the input Markdown file
    #[arg(required_unless_present = "print_default_config")]
    input_file: Option<PathBuf>,

    /// Directory to write the output files (defaults to same directory as input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Detect sections and report the planned files without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable detailed profiling of all pipeline steps
    #[arg(long)]
    profile: bool,

    /// Write a JSON summary of the split (boundaries, files, input hash) to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the default configuration as YAML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    log::debug!("Arguments: {:?}", args);

    if args.print_default_config {
        print!("{}", SplitConfig::default().to_yaml()?);
        return Ok(());
    }

    let input = match &args.input_file {
        Some(input) => input,
        None => {
            eprintln!("❌ No input file given");
            std::process::exit(1);
        }
    };

    // Check if input file exists
    if !input.is_file() {
        eprintln!("❌ Input file '{}' not found.", input.display());
        std::process::exit(1);
    }

    let config = SplitConfig::load_with_fallback(args.config.as_deref());
    if let Some(config_path) = &args.config {
        log::info!("Loaded config from: {}", config_path);
    }

    let splitter = if args.dry_run {
        PaperSplitter::new_dry_run(config)?
    } else {
        PaperSplitter::new_cli(config)?
    };

    println!(
        "📄 Processing: {} ({} storage)",
        input.display(),
        splitter.storage_name()
    );

    match splitter.split_file_with_profiling(input, args.output_dir.as_deref(), args.profile) {
        Ok(outcome) => {
            print_outcome(&outcome, args.dry_run);

            if let Some(summary_path) = &args.summary {
                if let Err(e) = SplitReport::from_outcome(&outcome, args.dry_run).save(summary_path) {
                    eprintln!("❌ {e:#}");
                    std::process::exit(1);
                }
                println!("🧾 Summary saved to: {}", summary_path.display());
            }
        }
        Err(e) => {
            eprintln!("❌ Split failed: {e:#}");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn print_outcome(outcome: &SplitOutcome, dry_run: bool) {
    let verb = if dry_run { "Would create" } else { "Created" };

    for segment in &outcome.written {
        println!(
            "💾 {} {} file: {}",
            verb,
            segment.region.label().to_lowercase(),
            segment.path.display()
        );
    }

    for region in &outcome.missing {
        match region {
            Region::Backmatter => println!(
                "No backmatter (impact statement/acknowledgments/funding) section found."
            ),
            Region::Appendix => println!("No appendix section found."),
            Region::Main => {}
        }
    }
}
