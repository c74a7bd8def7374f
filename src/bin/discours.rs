use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info, warn, LevelFilter};

use discours::config::subsystems::PipelineMode;
use discours::matcher::{extract_quotes, DiscourseIndex, MatchingPipeline};
use discours::parser::{load_speeches, QuoteReader};
use discours::storage::write_outputs;
use discours::utils::{init_file_logger, InterruptFlag, DISCARDED_ROWS};
use discours::{DiscoursConfig, Result};

const DEFAULT_CONFIG: &str = "discours.ini";

#[derive(Parser, Debug)]
#[command(name = "discours", version, about = "Attribute press quotes to speeches and cluster them")]
struct Args {
    /// Speaker whose speeches are read from `{data_dir}/{speaker}Speeches.csv`
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    speaker: String,

    /// Article corpus (JSON lines), looked up in the data directory when not found as given
    #[arg(long, required_unless_present = "quotes_extracted")]
    file: Option<PathBuf>,

    /// INI configuration file (default: discours.ini when present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<PipelineMode>,

    /// Reuse the existing quote table instead of extracting quotes again
    #[arg(long)]
    quotes_extracted: bool,

    #[arg(long)]
    trailing_days: Option<u32>,

    /// Minimum partial-ratio score, strict
    #[arg(long)]
    threshold: Option<f64>,

    /// Minimum shared substring length to join a cluster, strict
    #[arg(long)]
    min_common_len: Option<usize>,

    #[arg(long)]
    batch_size: Option<usize>,

    #[arg(long)]
    debug: bool,
}

fn load_config(args: &Args) -> Result<DiscoursConfig> {
    let mut config = match &args.config {
        Some(path) => DiscoursConfig::from_ini(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => DiscoursConfig::from_ini(DEFAULT_CONFIG)?,
        None => DiscoursConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.attribution.mode = mode;
    }
    if let Some(days) = args.trailing_days {
        config.attribution.trailing_days = days;
    }
    if let Some(threshold) = args.threshold {
        config.attribution.discourse_threshold = Some(threshold);
    }
    if let Some(len) = args.min_common_len {
        config.clustering.cluster_min_common_len = len;
    }
    if let Some(size) = args.batch_size {
        config.processor.batch_size = size;
    }
    if args.debug {
        config.processor.debug = true;
        if config.processor.get_log_level() < LevelFilter::Debug {
            config.processor.set_log_level(LevelFilter::Debug);
        }
    }

    config.validate()?;
    Ok(config)
}

fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

fn run(args: &Args, config: &DiscoursConfig, interrupt: &InterruptFlag) -> Result<()> {
    let start = Instant::now();
    let files = &config.files;

    if args.quotes_extracted {
        info!("Reusing quote table {}", files.quotes_file.display());
    } else if let Some(file) = &args.file {
        let articles_path = if file.exists() { file.clone() } else { files.data_dir.join(file) };
        info!("Extracting quotes from {}", articles_path.display());
        let reader = BufReader::new(File::open(&articles_path)?);
        let stats = extract_quotes(reader, &files.quotes_file, &config.extraction)?;
        println!("Extracted {} quotes from {} articles", stats.quotes, stats.articles);
    }

    let speeches = load_speeches(files.speeches_path(&args.speaker))?;
    if speeches.is_empty() {
        warn!("No usable speeches for {}", args.speaker);
    }
    let index = DiscourseIndex::new(speeches);

    let mut quotes = QuoteReader::open(&files.quotes_file, config.extraction.min_quote_chars)?;
    let pipeline = MatchingPipeline::new(config, &index)?
        .with_interrupt(interrupt.shared())
        .with_progress(true);
    let outcome = pipeline.run(quotes.by_ref())?;
    if quotes.dropped() > 0 {
        warn!("{} quote rows dropped while reading", quotes.dropped());
    }

    let graph_path = files.graph_path(&args.speaker);
    let clusters_path = files.clusters_path(&args.speaker);
    write_outputs(&outcome.graph, &outcome.clusters, &graph_path, &clusters_path)?;

    let stats = &outcome.stats;
    println!(
        "{}: {} of {} quotes attributed, {} clusters over {} discourses ({})",
        args.speaker,
        stats.quotes_attributed,
        stats.quotes_seen,
        stats.clusters,
        stats.discourses,
        format_duration(start.elapsed())
    );
    println!("Graph: {}", graph_path.display());
    println!("Clusters: {}", clusters_path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    config.files.ensure_directories()?;

    let log_path = init_file_logger(&config.files.log_dir, "discours", config.processor.get_log_level())?;
    println!("Logging to {}", log_path.display());
    info!("Starting run for speaker {} in {} mode", args.speaker, config.attribution.mode.as_str());

    if config.processor.log_discarded_rows {
        DISCARDED_ROWS.init(&config.discarded_log_path())?;
    }

    let interrupt = InterruptFlag::new();
    interrupt.install()?;

    let result = run(&args, &config, &interrupt);
    if let Err(e) = DISCARDED_ROWS.flush() {
        warn!("Failed to flush discarded row log: {}", e);
    }
    if let Err(e) = &result {
        if interrupt.is_raised() {
            eprintln!("Interrupted, no tables written");
        }
        error!("Run failed: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("discours").chain(args.iter().copied()))
    }

    #[test]
    fn file_required_unless_quotes_extracted() {
        let err = parse(&["--speaker", "EMacron"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let args = parse(&["--speaker", "EMacron", "--quotes-extracted"]).unwrap();
        assert!(args.file.is_none());
        assert!(parse(&["--speaker", "EMacron", "--file", "articles.json"]).is_ok());
    }

    #[test]
    fn mode_is_parsed_by_clap() {
        let args = parse(&["--speaker", "EMacron", "--quotes-extracted", "--mode", "exact"]).unwrap();
        assert_eq!(args.mode, Some(PipelineMode::Exact));

        let err = parse(&["--speaker", "EMacron", "--quotes-extracted", "--mode", "fuzzy"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn empty_speaker_is_rejected() {
        let err = parse(&["--speaker", "", "--quotes-extracted"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn command_line_overrides_config() {
        let args = parse(&["--speaker", "EMacron", "--quotes-extracted", "--mode", "exact", "--batch-size", "10"]).unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.attribution.mode, PipelineMode::Exact);
        assert_eq!(config.processor.batch_size, 10);
    }
}
