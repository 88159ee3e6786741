//! Report formatting and printing utilities.
//!
//! Extracted messages are listed one per line as `path:line  function
//! message  # comments`; issues are printed in cargo style. Kept apart
//! from the core so glossa can be used as a library.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary, TranslateSummary},
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::{context::FileMessages, extract::ExtractedMessage},
    issues::{Issue, Report, ReportLocation, Severity},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract(summary, result),
        CommandSummary::Translate(summary) => print_translate(summary, result),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_extract(summary: &ExtractSummary, result: &CommandResult) {
    match summary.format {
        OutputFormat::Text => {
            let mut stdout = io::stdout().lock();
            print_messages_to(&summary.result.files, &mut stdout);
            report_to(&result.issues, &mut stdout);
            if result.issues.is_empty() {
                print_success_to(
                    summary.result.message_count(),
                    result.files_checked,
                    &mut stdout,
                );
            }
        }
        OutputFormat::Json => {
            // Keep stdout parseable.
            if let Err(e) = print_messages_json_to(&summary.result.files, &mut io::stdout().lock()) {
                eprintln!("Error: {:#}", e);
            }
            report_to(&result.issues, &mut io::stderr().lock());
        }
    }
}

fn print_translate(summary: &TranslateSummary, result: &CommandResult) {
    if let Some(output) = &summary.output {
        println!("{}", output);
    }
    report_to(&result.issues, &mut io::stderr().lock());
}

fn print_init(summary: &InitSummary) {
    if let Some(error) = &summary.error {
        eprintln!("{} {}", FAILURE_MARK.red(), format!("Error: {}", error).red());
    } else if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

/// Print extracted messages to a custom writer.
pub fn print_messages_to<W: Write>(files: &[FileMessages], writer: &mut W) {
    let function_width = files
        .iter()
        .flat_map(|file| &file.messages)
        .map(|message| function_name(message).width())
        .max()
        .unwrap_or(0);

    for file in files {
        for message in &file.messages {
            let location = format!("{}:{}", file.file_path, message.line);
            let function = function_name(message);
            let padding = function_width - function.width();

            let mut line = format!(
                "{}  {}{:padding$}  {}",
                location.blue(),
                function.cyan(),
                "",
                message.message,
                padding = padding
            );
            if !message.comments.is_empty() {
                line.push_str(&format!(
                    "  {}",
                    format!("# {}", message.comments.join("; ")).dimmed()
                ));
            }
            let _ = writeln!(writer, "{}", line);
        }
    }
}

/// Function column for a message: the gettext function, or `-` for text.
fn function_name(message: &ExtractedMessage) -> &str {
    message.function.as_deref().unwrap_or("-")
}

#[derive(Serialize)]
struct JsonMessage<'a> {
    file: &'a str,
    #[serde(flatten)]
    message: &'a ExtractedMessage,
}

/// Print extracted messages as a JSON array.
pub fn print_messages_json_to<W: Write>(files: &[FileMessages], writer: &mut W) -> Result<()> {
    let messages: Vec<JsonMessage<'_>> = files
        .iter()
        .flat_map(|file| {
            file.messages.iter().map(|message| JsonMessage {
                file: &file.file_path,
                message,
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut *writer, &messages)?;
    writeln!(writer)?;
    Ok(())
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(messages: usize, files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} from {} stream {}",
            messages,
            if messages == 1 { "message" } else { "messages" },
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print issues in cargo-style format to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    for issue in issues {
        print_issue(issue, writer);
    }

    print_summary(issues, writer);
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Line { path, line } => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), path, line);
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        if issues.len() == 1 { "problem" } else { "problems" },
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}
