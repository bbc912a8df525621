//! Backend commands queued from UI to backend worker.

use client_core::{ApiRequest, FormCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Execute(ApiRequest),
    StartCountdown,
    StopCountdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Execute(request) => request.name(),
            Self::StartCountdown => "start_countdown",
            Self::StopCountdown => "stop_countdown",
        }
    }

    /// Hands an undelivered command back to the form for failure handling.
    pub fn into_form_command(self) -> FormCommand {
        match self {
            Self::Execute(request) => FormCommand::Api(request),
            Self::StartCountdown => FormCommand::StartCountdown,
            Self::StopCountdown => FormCommand::StopCountdown,
        }
    }
}

impl From<FormCommand> for BackendCommand {
    fn from(command: FormCommand) -> Self {
        match command {
            FormCommand::Api(request) => Self::Execute(request),
            FormCommand::StartCountdown => Self::StartCountdown,
            FormCommand::StopCountdown => Self::StopCountdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::CollegeId;

    use super::*;

    #[test]
    fn form_commands_survive_the_queue_boundary() {
        let lookup = FormCommand::Api(ApiRequest::LookupMajors {
            college_id: CollegeId(8),
        });
        let cmd = BackendCommand::from(lookup.clone());
        assert_eq!(cmd.name(), "lookup_majors");
        assert_eq!(cmd.into_form_command(), lookup);

        assert_eq!(
            BackendCommand::from(FormCommand::StopCountdown).name(),
            "stop_countdown"
        );
    }
}
