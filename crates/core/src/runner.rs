//! Run orchestration against a remote agents service.

mod builder;
mod step;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::time::Duration;

use hosted_agent_service::{
    AgentService, AgentSpec, MessageRole, RunError as RemoteRunError,
    RunStatus, ServiceError, ThreadMessage, ToolCallRequest, ToolDefinition,
    ToolOutput,
};

use crate::tool::ToolRegistry;
pub use builder::RunnerBuilder;
use step::{Step, classify};

/// Puts the current task to sleep between run polls.
///
/// The runner takes this as a seam so tests can drive the poll loop
/// without real delays.
pub trait Sleeper: Send + Sync {
    /// Sleeps for the given duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// The default sleeper, backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    #[inline]
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Error type for a run interaction.
#[derive(Debug)]
pub enum Error {
    /// The prompt was empty; nothing was sent to the service.
    EmptyPrompt,
    /// The remote service failed. The run is abandoned without retry.
    Service(Box<dyn ServiceError>),
    /// The run required action but carried no tool calls to execute.
    NoToolOutputs,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyPrompt => write!(f, "user input must not be empty"),
            Error::Service(err) => write!(f, "agent service error: {err}"),
            Error::NoToolOutputs => {
                write!(f, "run requires tool outputs but none were produced")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Service(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[inline]
fn service_err<E: ServiceError>(err: E) -> Error {
    Error::Service(Box::new(err))
}

/// A request describing one full agent interaction.
#[derive(Clone, Debug)]
pub struct InteractionRequest {
    /// Display name for the temporary agent.
    pub agent_name: String,
    /// Standing instructions for the agent.
    pub instructions: String,
    /// The model deployment to bind the agent to.
    pub model: String,
    /// Service-side tools to attach in addition to the registered
    /// function tools, such as the code interpreter.
    pub builtin_tools: Vec<ToolDefinition>,
    /// The prompt to send as the first user turn.
    pub prompt: String,
    /// Optional instructions scoped only to this run.
    pub additional_instructions: Option<String>,
    /// Whether to delete the temporary agent after the run completes.
    pub auto_delete_agent: bool,
}

/// Collects the important records from a finished run.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// The service-assigned agent identifier.
    pub agent_id: String,
    /// The agent's display name.
    pub agent_name: String,
    /// The thread the interaction ran on.
    pub thread_id: String,
    /// The run identifier.
    pub run_id: String,
    /// The terminal status of the run.
    pub status: RunStatus,
    /// The last error reported by the run, if it failed.
    pub last_error: Option<RemoteRunError>,
    /// The full conversation, in chronological order.
    pub messages: Vec<ThreadMessage>,
}

impl RunOutcome {
    /// Whether the run finished successfully.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

/// Drives one prompt against a temporary remote agent: creates the
/// agent and its thread, starts a run, polls it to a terminal status
/// while answering tool calls from the registered tools, and collects
/// the resulting transcript.
///
/// Everything happens sequentially on the calling task. There is no
/// retry policy anywhere: a service error at any step ends the run.
pub struct Runner<S, SL = TokioSleeper> {
    service: S,
    registry: ToolRegistry,
    sleeper: SL,
    poll_interval: Duration,
    on_status: Option<Box<dyn Fn(&RunStatus) + Send + Sync>>,
}

impl<S, SL> Runner<S, SL>
where
    S: AgentService,
    SL: Sleeper,
{
    /// Runs a full interaction to its terminal status.
    pub async fn run_interaction(
        &self,
        req: InteractionRequest,
    ) -> Result<RunOutcome, Error> {
        if req.prompt.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }

        let mut tools = self.registry.definitions();
        tools.extend(req.builtin_tools.iter().cloned());
        let spec = AgentSpec {
            name: req.agent_name.clone(),
            instructions: req.instructions.clone(),
            model: req.model.clone(),
            tools,
        };

        let agent =
            self.service.create_agent(&spec).await.map_err(service_err)?;
        debug!("created agent: {}", agent.id);

        let thread =
            self.service.create_thread().await.map_err(service_err)?;
        debug!("created thread: {}", thread.id);

        self.service
            .create_message(&thread.id, MessageRole::User, &req.prompt)
            .await
            .map_err(service_err)?;

        let mut run = self
            .service
            .create_run(
                &thread.id,
                &agent.id,
                req.additional_instructions.as_deref(),
            )
            .await
            .map_err(service_err)?;
        debug!("created run {} with status: {}", run.id, run.status.as_str());

        loop {
            self.notify_status(&run.status);
            match classify(&run) {
                Step::Done(status) => {
                    debug!("run finished with status: {}", status.as_str());
                    break;
                }
                Step::Act(calls) => {
                    if calls.is_empty() {
                        return Err(Error::NoToolOutputs);
                    }
                    let outputs = self.execute_tool_calls(calls).await;
                    run = self
                        .service
                        .submit_tool_outputs(&thread.id, &run.id, outputs)
                        .await
                        .map_err(service_err)?;
                }
                Step::Wait => {
                    self.sleeper.sleep(self.poll_interval).await;
                    run = self
                        .service
                        .get_run(&thread.id, &run.id)
                        .await
                        .map_err(service_err)?;
                    trace!("polled run status: {}", run.status.as_str());
                }
            }
        }

        let messages = self
            .service
            .list_messages(&thread.id)
            .await
            .map_err(service_err)?;

        let outcome = RunOutcome {
            agent_id: agent.id.clone(),
            agent_name: agent.name,
            thread_id: thread.id,
            run_id: run.id,
            status: run.status,
            last_error: run.last_error,
            messages,
        };

        if req.auto_delete_agent {
            // A failed delete only leaks the temporary server-side
            // record; the run itself has already finished.
            match self.service.delete_agent(&agent.id).await {
                Ok(()) => debug!("deleted agent: {}", agent.id),
                Err(err) => {
                    warn!("failed to delete agent {}: {err}", agent.id);
                }
            }
        }

        Ok(outcome)
    }

    /// Executes the given tool calls sequentially, folding every
    /// failure into a human-readable output for the model.
    async fn execute_tool_calls(
        &self,
        calls: Vec<ToolCallRequest>,
    ) -> Vec<ToolOutput> {
        let mut outputs = Vec::with_capacity(calls.len());
        for call in calls {
            let output =
                match self.registry.dispatch(&call.name, call.arguments) {
                    Some(fut) => {
                        trace!("running tool `{}` ({})", call.name, call.id);
                        match fut.await {
                            Ok(output) => output,
                            Err(err) => format!("Error: {}", err.reason()),
                        }
                    }
                    None => {
                        warn!("tool not found: {}", call.name);
                        format!("Unknown tool: {}", call.name)
                    }
                };
            outputs.push(ToolOutput {
                call_id: call.id,
                output,
            });
        }
        outputs
    }

    #[inline]
    fn notify_status(&self, status: &RunStatus) {
        if let Some(on_status) = &self.on_status {
            on_status(status);
        }
    }
}
