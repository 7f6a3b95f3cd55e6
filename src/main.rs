use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use aligncheck::aligndef::{AlignmentIndex, AlignmentRecord};
use aligncheck::corpus::{CorpusProvider, SnapshotProvider};
use aligncheck::diagnostics::{scan_for_gaps, GapConfig, OrderCheck, DEFAULT_GAP_THRESHOLD};
use aligncheck::validation::{
    Validator, ValidatorConfig, DEFAULT_SENTENCE_ATTR, DEFAULT_STRUCTURE,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aligncheck", about = "Sentence alignment validator and diagnostics", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every structure boundary of CORP1 against the aligndef file.
    Validate {
        /// Corpus A identifier (resolved against the registry path).
        corp1: String,
        /// Corpus B identifier (resolved against the registry path).
        corp2: String,
        /// Alignment definition file.
        aligndef_file: PathBuf,
        /// Directory holding corpus snapshots.
        #[arg(short, long, default_value = "")]
        registry_path: PathBuf,
        /// Structure whose boundaries are validated.
        #[arg(short, long, default_value = DEFAULT_STRUCTURE)]
        struct_name: String,
        /// Structural attribute holding sentence identifiers.
        #[arg(long, default_value = DEFAULT_SENTENCE_ATTR)]
        sentence_attr: String,
    },
    /// Report alignment records with suspiciously wide spans.
    Gaps {
        /// Alignment definition file.
        aligndef_file: PathBuf,
        /// Widths above this value are reported.
        #[arg(long, default_value_t = DEFAULT_GAP_THRESHOLD)]
        threshold: u32,
        /// Also report records overlapping an already covered range.
        #[arg(long)]
        check_order: bool,
    },
    /// Print the record covering each corpus A sentence position.
    Lookup {
        /// Alignment definition file.
        aligndef_file: PathBuf,
        /// Sentence positions in corpus A.
        #[arg(required = true)]
        positions: Vec<u32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            corp1,
            corp2,
            aligndef_file,
            registry_path,
            struct_name,
            sentence_attr,
        } => {
            let config = ValidatorConfig::default()
                .with_structure(struct_name)
                .with_sentence_attr(sentence_attr);
            run_validate(&registry_path, &corp1, &corp2, &aligndef_file, config)?
        }
        Commands::Gaps {
            aligndef_file,
            threshold,
            check_order,
        } => run_gaps(&aligndef_file, threshold, check_order)?,
        Commands::Lookup {
            aligndef_file,
            positions,
        } => run_lookup(&aligndef_file, &positions)?,
    }

    Ok(())
}

fn run_validate(
    registry: &Path,
    corp1: &str,
    corp2: &str,
    aligndef_path: &Path,
    config: ValidatorConfig,
) -> Result<()> {
    let provider = SnapshotProvider::new(registry);
    let corpus_a = provider
        .open_corpus(corp1)
        .with_context(|| format!("failed to open corpus {corp1}"))?;
    let corpus_b = provider
        .open_corpus(corp2)
        .with_context(|| format!("failed to open corpus {corp2}"))?;
    let index = load_index(aligndef_path)?;

    let validator = Validator::new(&corpus_a, &index, config)
        .context("failed to prepare validator")?
        .with_counterpart(&corpus_b)
        .context("failed to prepare validator")?;

    let summary = validator
        .run_with(|outcome| match outcome {
            Ok(report) => println!("{report}"),
            Err(err) => println!("ERROR: {err}"),
        })
        .context("validation aborted")?;

    info!(%summary, "done");
    Ok(())
}

fn run_gaps(aligndef_path: &Path, threshold: u32, check_order: bool) -> Result<()> {
    let lines = read_lines(aligndef_path)?;
    let config = GapConfig::default().with_threshold(threshold);

    let mut findings = 0usize;
    for item in scan_for_gaps(&lines, config) {
        match item {
            Ok(finding) => {
                findings += 1;
                println!("{finding}");
            }
            Err(err) => warn!("skipping line: {err}"),
        }
    }

    if check_order {
        let mut check = OrderCheck::new();
        for (idx, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            // malformed lines were already reported by the gap scan
            if let Ok(record) = AlignmentRecord::parse(line) {
                for violation in check.check(idx + 1, &record) {
                    println!("{violation}");
                }
            }
        }
    }

    info!(findings, threshold, "gap scan finished");
    Ok(())
}

fn run_lookup(aligndef_path: &Path, positions: &[u32]) -> Result<()> {
    let index = load_index(aligndef_path)?;
    for &position in positions {
        match index.lookup(position) {
            Some(entry) => println!("{position}\t{entry}"),
            None => println!("{position}\tnot found"),
        }
    }
    Ok(())
}

fn load_index(path: &Path) -> Result<AlignmentIndex> {
    AlignmentIndex::from_path(path)
        .with_context(|| format!("failed to load aligndef file {}", path.display()))
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
    );
    reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to read {}", path.display()))
}
