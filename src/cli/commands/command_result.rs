use crate::{
    cli::{args::OutputFormat, exit_status::ExitStatus},
    core::context::ExtractResult,
    issues::Issue,
};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Translate(TranslateSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    /// Extracted messages; issues are moved to [`CommandResult::issues`].
    pub result: ExtractResult,
    pub format: OutputFormat,
}

#[derive(Debug)]
pub struct TranslateSummary {
    /// The translated stream as JSON, `None` when translation failed.
    pub output: Option<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running glossa commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// All issues found by the command, sorted.
    pub issues: Vec<Issue>,
    /// Number of stream files that were read.
    pub files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::from_error_count(self.error_count)
    }
}
