use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use log::{debug, warn};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        error::I18nError,
        extract::{ExtractedMessage, Extractor},
        file_scanner::scan_files,
        parsers::stream::parse_stream_file,
    },
    issues::{Issue, MessageErrorIssue, ParseErrorIssue},
};

/// Messages extracted from one stream file, in stream order.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMessages {
    pub file_path: String,
    pub messages: Vec<ExtractedMessage>,
}

/// Outcome of extracting from every discovered stream file.
#[derive(Debug, Default)]
pub struct ExtractResult {
    /// Files that produced at least one message, in path order.
    pub files: Vec<FileMessages>,
    pub issues: Vec<Issue>,
    pub files_checked: usize,
}

impl ExtractResult {
    pub fn message_count(&self) -> usize {
        self.files.iter().map(|file| file.messages.len()).sum()
    }
}

/// Load the configuration for a command and apply its CLI overrides.
///
/// Configuration is merged with the following priority (highest to lowest):
/// 1. CLI arguments (`--no-text`, `--option key=value`)
/// 2. `.glossarc.json` config file
/// 3. Built-in defaults
pub fn merged_config(common_args: &CommonArgs) -> Result<Config> {
    // The CLI source root decides where the config is searched for.
    let search_root = common_args
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let config_result = load_config(&search_root)?;
    if !config_result.from_file {
        debug!(
            "no {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }

    let mut config = config_result.config;

    let overrides = common_args
        .options
        .iter()
        .map(|option| {
            option
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected KEY=VALUE, got \"{}\"", option))
        })
        .collect::<Result<Vec<_>>>()?;
    config.apply_options(overrides)?;

    if common_args.no_text {
        config.extract_text = false;
    }

    Ok(config)
}

/// Extraction run over a source tree.
pub struct ExtractContext {
    pub config: Config,

    /// Directory the stream files are discovered under.
    pub root_dir: PathBuf,

    /// Stream files to extract from, in path order.
    pub files: BTreeSet<String>,

    extractor: Extractor,
}

impl ExtractContext {
    /// Load configuration and discover stream files.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or an override names an
    /// unknown option.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let config = merged_config(common_args)?;

        let root_dir = match &common_args.source_root {
            Some(source_root) => source_root.clone(),
            None => PathBuf::from(&config.source_root),
        };
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let scan_result = scan_files(path, &config.includes, &config.ignores);
        if scan_result.skipped_count > 0 {
            warn!(
                "{} path(s) skipped due to access errors",
                scan_result.skipped_count
            );
        }
        debug!(
            "found {} stream file(s) under {}",
            scan_result.files.len(),
            root_dir.display()
        );

        let extractor = config.extractor();

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            extractor,
        })
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Extract messages from every stream file.
    ///
    /// Each file is read, parsed and traversed independently on the rayon
    /// pool. A file that fails to load becomes a parse-error issue; a file
    /// whose extraction fails keeps the messages found before the failure
    /// and adds a message-error issue.
    pub fn extract(&self) -> ExtractResult {
        let results: Vec<_> = self
            .files
            .par_iter()
            .map(|file_path| (file_path, extract_file(&self.extractor, Path::new(file_path))))
            .collect();

        let mut extract_result = ExtractResult {
            files_checked: results.len(),
            ..Default::default()
        };

        for (file_path, result) in results {
            match result {
                Ok((messages, error)) => {
                    if let Some(error) = error {
                        warn!("{}: {}", file_path, error);
                        extract_result
                            .issues
                            .push(Issue::MessageError(MessageErrorIssue::new(
                                file_path.as_str(),
                                error,
                            )));
                    }
                    if !messages.is_empty() {
                        extract_result.files.push(FileMessages {
                            file_path: file_path.clone(),
                            messages,
                        });
                    }
                }
                Err(e) => {
                    warn!("{}: {:#}", file_path, e);
                    extract_result
                        .issues
                        .push(Issue::ParseError(ParseErrorIssue {
                            file_path: file_path.clone(),
                            error: format!("{:#}", e),
                        }));
                }
            }
        }

        extract_result.issues.sort();
        extract_result
    }
}

type FileExtraction = (Vec<ExtractedMessage>, Option<I18nError>);

fn extract_file(extractor: &Extractor, path: &Path) -> Result<FileExtraction> {
    let events = parse_stream_file(path)?;

    let mut messages = Vec::new();
    for item in extractor.extract(events) {
        match item {
            Ok(message) => messages.push(message),
            Err(error) => return Ok((messages, Some(error))),
        }
    }
    Ok((messages, None))
}
