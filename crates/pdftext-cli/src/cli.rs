use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Read metadata and page text from PDF documents, including password-protected ones.
#[derive(Debug, Parser)]
#[command(name = "pdftext", about, version)]
pub struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show page count and document information
    Info {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Password for encrypted PDFs
        #[arg(long, default_value = "")]
        password: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Extract the text of a single page
    Page {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page number (1-based)
        #[arg(value_name = "NUMBER")]
        number: usize,

        /// Password for encrypted PDFs
        #[arg(long, default_value = "")]
        password: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Extract the text of several pages, in the order given
    Text {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page list (e.g. '1,5,2' or '2-4'). Order and repeats are kept. Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Password for encrypted PDFs
        #[arg(long, default_value = "")]
        password: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Answer JSON requests read line by line from stdin
    Serve {
        /// Number of worker threads (default: one per CPU)
        #[arg(long)]
        workers: Option<usize>,
    },
}

/// Output format for the one-shot subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}
