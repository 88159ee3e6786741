//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract translatable messages from stream files
//! - `translate`: Translate a stream file with a JSON catalog
//! - `init`: Initialize glossa configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by `extract` and `translate`.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source root directory (overrides config file)
    #[arg(long, env = "GLOSSA_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Do not extract or translate plain text and attribute values
    #[arg(long)]
    pub no_text: bool,

    /// Extractor option as KEY=VALUE (extract_text, ignore_tags, include_attrs)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Stream file to translate
    pub stream: PathBuf,

    /// JSON message catalog (messages are kept as-is without one)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable messages from *.stream.json files
    Extract(ExtractCommand),
    /// Translate a stream file and expand its i18n directives
    Translate(TranslateCommand),
    /// Initialize a new .glossarc.json configuration file
    Init,
}
