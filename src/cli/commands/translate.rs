use anyhow::{Context, Result};
use log::debug;

use super::{CommandResult, CommandSummary, TranslateSummary, helper::finish};
use crate::{
    cli::args::TranslateCommand,
    core::{
        context::merged_config,
        error::I18nError,
        parsers::{catalog::Catalog, stream::parse_stream_file},
        stream::Event,
        translate::{Gettext, Translator, expand},
    },
    issues::{Issue, MessageErrorIssue},
};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let config = merged_config(&cmd.common)?;
    let events = parse_stream_file(&cmd.stream)?;

    let gettext = match &cmd.catalog {
        Some(path) => Gettext::translations(Catalog::load(path)?),
        None => {
            debug!("no catalog given, messages are kept as-is");
            Gettext::default()
        }
    };
    let translator = Translator::new(gettext).with_options(config.options());

    let (summary, issues) = match translate_stream(&translator, events) {
        Ok(events) => {
            let output = serde_json::to_string_pretty(&events)
                .context("Failed to serialize translated stream")?;
            (
                TranslateSummary {
                    output: Some(output),
                },
                Vec::new(),
            )
        }
        Err(error) => (
            TranslateSummary { output: None },
            vec![Issue::MessageError(MessageErrorIssue::new(
                cmd.stream.to_string_lossy(),
                error,
            ))],
        ),
    };

    Ok(finish(CommandSummary::Translate(summary), issues, 1))
}

/// Translate the stream, then expand its i18n directives.
fn translate_stream(translator: &Translator, events: Vec<Event>) -> Result<Vec<Event>, I18nError> {
    let translated = translator
        .translate(events)
        .collect::<Result<Vec<_>, _>>()?;
    expand(translator.gettext(), translated).collect()
}
