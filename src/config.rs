use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{
    extract::{Extractor, GETTEXT_FUNCTIONS},
    options::{DEFAULT_INCLUDE_ATTRS, Options, default_ignore_tags},
    stream::QName,
};

pub const CONFIG_FILE_NAME: &str = ".glossarc.json";

/// Suffix of the event stream files picked up by `extract`.
pub const STREAM_FILE_SUFFIX: &str = ".stream.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignore_tags")]
    pub ignore_tags: Vec<String>,
    #[serde(default = "default_include_attrs")]
    pub include_attrs: Vec<String>,
    #[serde(default = "default_extract_text")]
    pub extract_text: bool,
    #[serde(default = "default_gettext_functions")]
    pub gettext_functions: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
}

fn default_include_attrs() -> Vec<String> {
    DEFAULT_INCLUDE_ATTRS.map(String::from).to_vec()
}

fn default_extract_text() -> bool {
    true
}

fn default_gettext_functions() -> Vec<String> {
    GETTEXT_FUNCTIONS.map(String::from).to_vec()
}

fn default_source_root() -> String {
    "./".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_tags: default_ignore_tags(),
            include_attrs: default_include_attrs(),
            extract_text: default_extract_text(),
            gettext_functions: default_gettext_functions(),
            includes: Vec::new(),
            ignores: Vec::new(),
            source_root: default_source_root(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are
    /// invalid, or if no gettext function is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.gettext_functions.is_empty() {
            bail!("'gettextFunctions' must name at least one function");
        }

        Ok(())
    }

    /// Apply extractor options given as strings, the way message extraction
    /// front ends pass them on the command line.
    ///
    /// Recognized keys are `extract_text` (`1`, `on`, `yes` or `true`
    /// enable it, anything else disables it) and the whitespace-separated
    /// lists `ignore_tags` and `include_attrs`. Unknown keys are rejected.
    pub fn apply_options<'a>(
        &mut self,
        options: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<()> {
        for (key, value) in options {
            match key {
                "extract_text" => {
                    self.extract_text = matches!(
                        value.trim().to_lowercase().as_str(),
                        "1" | "on" | "yes" | "true"
                    );
                }
                "ignore_tags" => {
                    self.ignore_tags = value.split_whitespace().map(String::from).collect();
                }
                "include_attrs" => {
                    self.include_attrs = value.split_whitespace().map(String::from).collect();
                }
                _ => bail!("Unknown extractor option: \"{}\"", key),
            }
        }
        Ok(())
    }

    pub fn options(&self) -> Options {
        Options {
            ignore_tags: self.ignore_tags.iter().map(|t| QName::new(t)).collect(),
            include_attrs: self.include_attrs.iter().cloned().collect(),
            extract_text: self.extract_text,
        }
    }

    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.options(), self.gettext_functions.clone())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            debug!("loaded configuration from {:?}", path);
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
