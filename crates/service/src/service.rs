use std::error::Error;
use std::path::Path;

use crate::agent::{AgentSpec, RemoteAgent};
use crate::error::ErrorKind;
use crate::message::{MessageRole, Thread, ThreadMessage};
use crate::run::{Run, ToolOutput};

/// The error type for an agent service.
pub trait ServiceError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a remote agents service, which owns agent
/// definitions, conversation threads and runs.
///
/// Once the service handle is created, it should behave like a
/// stateless object. It can still have internal state, but callers
/// should not rely on it, and the handle should be prepared for being
/// dropped anytime.
pub trait AgentService: Send + Sync {
    /// The error type that may be returned by the service.
    type Error: ServiceError;

    /// Creates a new agent from the given definition.
    fn create_agent(
        &self,
        spec: &AgentSpec,
    ) -> impl Future<Output = Result<RemoteAgent, Self::Error>> + Send + 'static;

    /// Creates a new conversation thread.
    fn create_thread(
        &self,
    ) -> impl Future<Output = Result<Thread, Self::Error>> + Send + 'static;

    /// Appends a message to a thread.
    fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static;

    /// Starts a run of the given agent against a thread.
    ///
    /// `additional_instructions` are scoped to this run only and don't
    /// modify the agent's standing instructions.
    fn create_run(
        &self,
        thread_id: &str,
        agent_id: &str,
        additional_instructions: Option<&str>,
    ) -> impl Future<Output = Result<Run, Self::Error>> + Send + 'static;

    /// Retrieves the current state of a run.
    fn get_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> impl Future<Output = Result<Run, Self::Error>> + Send + 'static;

    /// Submits tool outputs for a run that requires action, resuming it.
    fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> impl Future<Output = Result<Run, Self::Error>> + Send + 'static;

    /// Lists the messages of a thread in chronological order.
    fn list_messages(
        &self,
        thread_id: &str,
    ) -> impl Future<Output = Result<Vec<ThreadMessage>, Self::Error>> + Send + 'static;

    /// Deletes an agent.
    fn delete_agent(
        &self,
        agent_id: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static;

    /// Downloads a service-owned file to a local path.
    fn save_file(
        &self,
        file_id: &str,
        dest: &Path,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static;
}
