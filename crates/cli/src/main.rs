use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use tablefact_claim::{ClaimPipeline, TemplateGenerator, TextualClaim};
use tablefact_retriever::{
    classify, RandomSampler, Retriever, RetrieverConfig, TableType,
};
use tablefact_table_model::{Corpus, JsonlCorpus};

use crate::flags::{EncodingFlag, KeyStrategyFlag};

mod flags;

#[derive(Parser)]
#[command(name = "tablefact")]
#[command(about = "Claim dataset builder over semi-structured wiki tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve evidence from a corpus and emit labeled claim records
    Retrieve(RetrieveArgs),

    /// Print table statistics for a corpus
    Stats(StatsArgs),
}

#[derive(Args)]
struct RetrieveArgs {
    /// Corpus file: one page JSON object per line
    #[arg(long)]
    corpus: PathBuf,

    /// How many SUPPORTS evidences to retrieve
    #[arg(long, default_value_t = 50)]
    num_positive: usize,

    /// How many REFUTES evidences to retrieve
    #[arg(long, default_value_t = 50)]
    num_negative: usize,

    /// How many cells to corrupt per REFUTES evidence
    #[arg(long, default_value_t = 1)]
    wrong_cell: usize,

    /// How many tables to attempt per page
    #[arg(long, default_value_t = 1)]
    table_per_page: usize,

    /// How many evidences to extract per table
    #[arg(long, default_value_t = 1)]
    evidence_per_table: usize,

    /// How many cells per evidence
    #[arg(long, default_value_t = 2)]
    column_per_table: usize,

    /// Column-selection strategy
    #[arg(long, value_enum, default_value_t = KeyStrategyFlag::Random)]
    key_strategy: KeyStrategyFlag,

    /// Seed for the run's random generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Evidence-to-text encoding for claim generation
    #[arg(long, value_enum, default_value_t = EncodingFlag::Compact)]
    encoding: EncodingFlag,

    /// Output file (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct StatsArgs {
    /// Corpus file: one page JSON object per line
    #[arg(long)]
    corpus: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Retrieve(args) => retrieve(args, cli.verbose),
        Commands::Stats(args) => stats(&args),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.target(env_logger::Target::Stderr).init();
}

fn retrieve(args: RetrieveArgs, verbose: bool) -> Result<()> {
    let config = RetrieverConfig {
        num_positive: args.num_positive,
        num_negative: args.num_negative,
        wrong_cell: args.wrong_cell,
        table_per_page: args.table_per_page,
        evidence_per_table: args.evidence_per_table,
        column_per_table: args.column_per_table,
        key_strategy: args.key_strategy.as_domain(),
        seed: args.seed,
        verbose,
    };
    config
        .validate()
        .map_err(|msg| anyhow::anyhow!(msg))
        .context("invalid retrieval configuration")?;

    let corpus = JsonlCorpus::open(&args.corpus)
        .with_context(|| format!("failed to open corpus {}", args.corpus.display()))?;

    let sampler = RandomSampler::new(config.evidence_per_table, config.column_per_table)
        .with_key_strategy(config.key_strategy);
    let outcome = Retriever::new(corpus, sampler, config).retrieve();

    let pipeline = ClaimPipeline::new(TemplateGenerator::new(), args.encoding.as_domain());
    let progress = claim_progress(outcome.evidence.len() as u64);
    let mut claims = Vec::with_capacity(outcome.evidence.len());
    for evidence in &outcome.evidence {
        claims.push(pipeline.generate_one(evidence)?);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let records = TextualClaim::to_json_records(&claims);
    let json = serde_json::to_string_pretty(&records)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} record(s) to {}", records.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}

fn stats(args: &StatsArgs) -> Result<()> {
    let corpus = JsonlCorpus::open(&args.corpus)
        .with_context(|| format!("failed to open corpus {}", args.corpus.display()))?;

    let mut tables = 0usize;
    let mut relational = 0usize;
    let mut entity = 0usize;
    let mut headerless = 0usize;

    let ids = corpus.doc_ids();
    for id in &ids {
        let page = corpus.get_page(id)?;
        for table in page.get_tables() {
            tables += 1;
            match classify(table).table_type() {
                Some(TableType::Relational) => relational += 1,
                Some(TableType::Entity) => entity += 1,
                None => headerless += 1,
            }
        }
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "{}",
        serde_json::json!({
            "pages": ids.len(),
            "tables": tables,
            "relational": relational,
            "entity": entity,
            "headerless": headerless,
        })
    )?;
    Ok(())
}

fn claim_progress(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("generating claims");
    bar
}
