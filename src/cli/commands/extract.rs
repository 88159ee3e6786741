use anyhow::Result;

use super::{CommandResult, CommandSummary, ExtractSummary, helper::finish};
use crate::{cli::args::ExtractCommand, core::context::ExtractContext};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let context = ExtractContext::new(&cmd.common)?;
    let mut result = context.extract();

    let issues = std::mem::take(&mut result.issues);
    let files_checked = result.files_checked;
    Ok(finish(
        CommandSummary::Extract(ExtractSummary {
            result,
            format: cmd.format,
        }),
        issues,
        files_checked,
    ))
}
