use std::process::ExitCode;

/// Exit status of a glossa run.
///
/// - `Success` (0): everything extracted or translated cleanly
/// - `Failure` (1): the run finished but reported issues
/// - `Error` (2): the run could not complete (bad config, unreadable input)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_error_count(error_count: usize) -> Self {
        if error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
