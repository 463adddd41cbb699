//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, Document};
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, Record, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

pub mod dates;
pub mod dedup;
pub mod entities;
pub mod generate_config;
pub mod highlight;
pub mod stats;
pub mod terms;
pub mod windows;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split documents into overlapping word-aligned windows
    Windows(windows::WindowsArgs),

    /// Extract excerpts around vocabulary terms
    Terms(terms::TermsArgs),

    /// Extract excerpts around dates
    Dates(dates::DatesArgs),

    /// List capitalised entity names
    Entities(entities::EntitiesArgs),

    /// Report lexical statistics per document
    Stats(stats::StatsArgs),

    /// Drop repeated or near-duplicate pages
    Dedup(dedup::DedupArgs),

    /// Render highlighted HTML
    Highlight(highlight::HighlightArgs),

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Windows(args) => args.execute(),
            Commands::Terms(args) => args.execute(),
            Commands::Dates(args) => args.execute(),
            Commands::Entities(args) => args.execute(),
            Commands::Stats(args) => args.execute(),
            Commands::Dedup(args) => args.execute(),
            Commands::Highlight(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One tab-separated record per line
    Text,
    /// JSON array of records
    Json,
    /// Markdown list per input file
    Markdown,
}

/// Flags shared by every document command
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: `output.default_format` from the config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Worker threads (default: one per CPU)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,
}

impl CommonArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A second initialisation in the same process is harmless
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }

    /// Logging plus configuration, the first step of every command
    pub fn setup(&self) -> Result<CliConfig> {
        self.init_logging();
        let config = CliConfig::load(self.config.as_deref())?;
        log::debug!("Arguments: {:?}", self);
        Ok(config)
    }

    fn thread_count(&self, config: &CliConfig) -> usize {
        self.threads
            .filter(|&n| n > 0)
            .or(Some(config.performance.worker_threads).filter(|&n| n > 0))
            .unwrap_or_else(num_cpus::get)
    }

    /// Run `f` over every input document in parallel.
    ///
    /// Results come back in input order whatever order the workers finish.
    pub fn documents<T, F>(&self, config: &CliConfig, f: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Document) -> Result<T> + Sync,
    {
        let files = resolve_patterns(&self.input)?;
        let threads = self.thread_count(config);
        log::info!("Processing {} file(s) on {} thread(s)", files.len(), threads);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build thread pool")?;
        let progress = ProgressReporter::for_files(files.len() as u64, self.quiet);

        let results = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let document = Document::read(path)?;
                    let result = f(&document)
                        .with_context(|| format!("Failed to process {}", path.display()))?;
                    progress.file_completed(&document.name());
                    Ok(result)
                })
                .collect::<Result<Vec<T>>>()
        });
        progress.finish();
        results
    }

    /// Destination for command output
    pub fn writer(&self) -> Result<Box<dyn Write + Send + Sync>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout())),
        }
    }

    fn resolved_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_str(&config.output.default_format, true).map_err(|_| {
                CliError::Config(format!(
                    "unknown output format {:?}",
                    config.output.default_format
                ))
                .into()
            }),
        }
    }

    /// Write per-document record groups through the selected formatter
    pub fn emit(&self, config: &CliConfig, groups: Vec<Vec<Record>>) -> Result<()> {
        let show_source = groups.len() > 1;
        let writer = self.writer()?;
        let mut formatter: Box<dyn OutputFormatter> = match self.resolved_format(config)? {
            OutputFormat::Text => Box::new(TextFormatter::new(writer).with_source(show_source)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, config.output.pretty_json)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        };

        let mut total = 0;
        for record in groups.iter().flatten() {
            formatter.format_record(record)?;
            total += 1;
        }
        formatter.finish()?;
        log::info!("Wrote {total} record(s)");
        Ok(())
    }
}

/// Vocabulary given on the command line or in a file
#[derive(Debug, Clone, Args)]
pub struct TermArgs {
    /// Term or phrase to match (repeatable)
    #[arg(short = 'T', long = "term", value_name = "PHRASE")]
    pub terms: Vec<String>,

    /// File with one term or phrase per line
    #[arg(long, value_name = "FILE")]
    pub vocab: Option<PathBuf>,
}

impl TermArgs {
    /// All terms in order, trimmed, blank lines skipped.
    ///
    /// Repeated phrases are kept so compiling the vocabulary reports them.
    pub fn load(&self) -> Result<Vec<String>> {
        let mut terms = self.terms.clone();
        if let Some(path) = &self.vocab {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))?;
            terms.extend(source.lines().map(str::to_string));
        }

        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if terms.is_empty() {
            return Err(CliError::MissingVocabulary.into());
        }
        log::debug!("Loaded {} term(s)", terms.len());
        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_parse_common_flags() {
        let cli = TestCli::try_parse_from([
            "textkit", "windows", "-i", "a.txt", "-i", "b/*.txt", "-f", "json", "-vv", "-t", "2",
        ])
        .unwrap();
        let Commands::Windows(args) = cli.command else {
            panic!("expected windows command");
        };
        assert_eq!(args.common.input, vec!["a.txt", "b/*.txt"]);
        assert_eq!(args.common.format, Some(OutputFormat::Json));
        assert_eq!(args.common.verbose, 2);
        assert_eq!(args.common.threads, Some(2));
    }

    #[test]
    fn test_input_required() {
        assert!(TestCli::try_parse_from(["textkit", "stats"]).is_err());
    }

    #[test]
    fn test_thread_count_precedence() {
        let cli = TestCli::try_parse_from(["textkit", "stats", "-i", "x"]).unwrap();
        let Commands::Stats(args) = cli.command else {
            panic!("expected stats command");
        };
        let mut config = CliConfig::default();
        config.performance.worker_threads = 3;
        assert_eq!(args.common.thread_count(&config), 3);

        let mut common = args.common.clone();
        common.threads = Some(5);
        assert_eq!(common.thread_count(&config), 5);
    }

    #[test]
    fn test_format_from_config() {
        let cli = TestCli::try_parse_from(["textkit", "stats", "-i", "x"]).unwrap();
        let Commands::Stats(args) = cli.command else {
            panic!("expected stats command");
        };
        let mut config = CliConfig::default();
        config.output.default_format = "Markdown".to_string();
        assert_eq!(args.common.resolved_format(&config).unwrap(), OutputFormat::Markdown);

        config.output.default_format = "yaml".to_string();
        assert!(args.common.resolved_format(&config).is_err());
    }

    #[test]
    fn test_term_loading() {
        let dir = tempfile::TempDir::new().unwrap();
        let vocab = dir.path().join("vocab.txt");
        fs::write(&vocab, "chest pain\n\n  doctor \nfever\n").unwrap();

        let args = TermArgs {
            terms: vec!["fever".to_string()],
            vocab: Some(vocab),
        };
        assert_eq!(
            args.load().unwrap(),
            vec!["fever", "chest pain", "doctor", "fever"]
        );

        let repeated = TermArgs {
            terms: vec!["fever".to_string(), "fever".to_string()],
            vocab: None,
        };
        let terms = repeated.load().unwrap();
        assert!(matches!(
            textkit_core::VocabRegex::compile(&terms, false),
            Err(textkit_core::Error::DuplicatePhrase(_))
        ));

        let empty = TermArgs {
            terms: Vec::new(),
            vocab: None,
        };
        let err = empty.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingVocabulary)
        ));
    }
}
