use hosted_agent_service::{Run, RunStatus, ToolCallRequest};

/// What the poll loop should do next for an observed run snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Sleep for the poll interval, then fetch the run again.
    Wait,
    /// Execute the given tool calls and submit their outputs.
    Act(Vec<ToolCallRequest>),
    /// The run reached a terminal status.
    Done(RunStatus),
}

pub(crate) fn classify(run: &Run) -> Step {
    if run.status.is_terminal() {
        Step::Done(run.status.clone())
    } else if run.status == RunStatus::RequiresAction {
        Step::Act(run.required_action.clone())
    } else {
        // Queued, in progress, or an intermediate status we don't know
        // about; wait a moment before re-checking.
        Step::Wait
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn run_with_status(status: RunStatus) -> Run {
        Run {
            id: "run:1".to_owned(),
            status,
            required_action: vec![],
            last_error: None,
        }
    }

    #[test]
    fn test_terminal_statuses_finish_the_loop() {
        for status in [
            RunStatus::Completed,
            RunStatus::Failed,
            RunStatus::Cancelled,
            RunStatus::Expired,
        ] {
            let run = run_with_status(status.clone());
            assert_eq!(classify(&run), Step::Done(status));
        }
    }

    #[test]
    fn test_requires_action_yields_the_tool_calls() {
        let call = ToolCallRequest {
            id: "call:1".to_owned(),
            name: "lookup".to_owned(),
            arguments: json!({ "query": "anything" }),
        };
        let run = Run {
            id: "run:1".to_owned(),
            status: RunStatus::RequiresAction,
            required_action: vec![call.clone()],
            last_error: None,
        };
        assert_eq!(classify(&run), Step::Act(vec![call]));
    }

    #[test]
    fn test_intermediate_statuses_keep_polling() {
        for status in [
            RunStatus::Queued,
            RunStatus::InProgress,
            RunStatus::Other("finalizing".to_owned()),
        ] {
            let run = run_with_status(status);
            assert_eq!(classify(&run), Step::Wait);
        }
    }
}
