#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use commitscope::{filesize_cmd, loc_cmd, report_cmd};

#[derive(Parser, Debug)]
#[command(name = "commitscope")]
#[command(about = "Repository history analytics: line provenance and file-size datasets", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set COMMITSCOPE_LOG)
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract per-line provenance into a CSV dataset
    Loc {
        /// Repository root to extract from
        #[arg(long, default_value = ".")]
        repo: std::path::PathBuf,
        /// Output CSV path
        #[arg(long, default_value = "meta/loc.csv")]
        output: std::path::PathBuf,
        /// Comma-separated extension allow-list (e.g. js,css)
        #[arg(long)]
        ext: Option<String>,
        /// TOML config file for the extraction allow-list
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },

    /// Snapshot per-commit file sizes into a CSV dataset
    Filesize {
        /// Repository root to snapshot
        #[arg(long, default_value = ".")]
        repo: std::path::PathBuf,
        /// Output CSV path
        #[arg(long, default_value = "meta/filesize.csv")]
        output: std::path::PathBuf,
        /// Comma-separated extension allow-list (e.g. js,css)
        #[arg(long)]
        ext: Option<String>,
        /// TOML config file for the extraction allow-list
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },

    /// Aggregate a dataset and evaluate the timeline playback filter
    Report {
        /// Dataset CSV produced by `loc` or `filesize`
        #[arg(long)]
        input: std::path::PathBuf,
        /// Slider position in [0, 100]
        #[arg(long, default_value_t = 100.0)]
        position: f64,
        /// Write per-commit summaries as JSON to this file
        #[arg(long)]
        json: Option<std::path::PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("COMMITSCOPE_LOG").unwrap_or_else(|_| {
        if verbose { "commitscope=debug".to_string() } else { "commitscope=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Loc { repo, output, ext, config } => loc_cmd::run(repo, output, ext, config),
        Commands::Filesize { repo, output, ext, config } => {
            filesize_cmd::run(repo, output, ext, config)
        }
        Commands::Report { input, position, json } => report_cmd::run(input, position, json),
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
