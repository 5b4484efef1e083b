//! Command line argument parsing for the Chatterbox CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, BIND_ENV, CORPUS_ENV, PORT_ENV, RESOURCE_DIR_ENV};
use crate::error::Result;

/// Chatterbox - answers questions from a question/answer corpus
#[derive(Parser, Debug, Clone)]
#[command(name = "chatterbox")]
#[command(about = "A retrieval-style chatbot trained on a question/answer CSV corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ChatterboxArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Question/answer CSV corpus
    #[arg(long, env = CORPUS_ENV, global = true, value_name = "CSV")]
    pub corpus: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the tokenizer resource
    #[arg(long, env = RESOURCE_DIR_ENV, global = true, value_name = "DIR")]
    pub resource_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ChatterboxArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Configuration from `--config` (or defaults) with command line and
    /// environment overrides applied.
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(corpus) = &self.corpus {
            config.corpus_path = corpus.clone();
        }
        if let Some(dir) = &self.resource_dir {
            config.resource_dir = Some(dir.clone());
        }
        if let Command::Serve(serve) = &self.command {
            if let Some(port) = serve.port {
                config.server.port = port;
            }
            if let Some(bind) = &serve.bind {
                config.server.bind = bind.clone();
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Answer a single question
    Ask(AskArgs),

    /// Interactive chat on the terminal
    Chat(ChatArgs),

    /// Measure hold-out accuracy on the corpus
    Evaluate(EvaluateArgs),

    /// Serve the line-oriented chat protocol over TCP
    Serve(ServeArgs),

    /// Install the tokenizer resource
    Setup,

    /// Show corpus and model statistics
    Stats,
}

/// Arguments for answering a question
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// The question; words are joined with spaces
    #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    /// The question as one string.
    pub fn text(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for the interactive chat
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Print the transcript when the chat ends
    #[arg(long)]
    pub transcript: bool,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Fraction of the corpus held out (overrides the configuration)
    #[arg(long)]
    pub test_size: Option<f64>,

    /// Shuffle seed (overrides the configuration)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the TCP service
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = PORT_ENV)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(short, long, env = BIND_ENV)]
    pub bind: Option<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
