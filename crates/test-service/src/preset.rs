use hosted_agent_service::{ErrorKind, RunStatus, ToolCallRequest};

/// One step of a scripted run.
///
/// Every service call that returns a [`hosted_agent_service::Run`]
/// snapshot (creating a run, polling it, submitting tool outputs)
/// consumes the next step in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunStep {
    /// Report the run with the given status and no required action.
    Status(RunStatus),
    /// Report the run as blocked on the given tool calls.
    RequiresAction(Vec<ToolCallRequest>),
    /// Fail the service call itself with an error of the given kind.
    Fail(ErrorKind),
}
