//! A local fake agents service for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::ready;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use hosted_agent_service::{
    AgentService, AgentSpec, ErrorKind, MessageRole, RemoteAgent, Run,
    RunStatus, ServiceError, Thread, ThreadMessage, ToolOutput,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct State {
    script: VecDeque<RunStep>,
    created_agents: Vec<AgentSpec>,
    messages: Vec<ThreadMessage>,
    submitted_outputs: Vec<Vec<ToolOutput>>,
    deleted_agents: Vec<String>,
    saved_files: Vec<(String, PathBuf)>,
    next_agent_id: u64,
}

/// A local fake agents service for testing purpose.
///
/// Before starting a run, you need to setup the run script, which is
/// the sequence of run snapshots the service should report. Every call
/// that returns a run consumes the next step, and an exhausted script
/// produces an error. Submitted tool outputs are echoed back into the
/// thread as an assistant message, so end-to-end tests can assert on
/// the final transcript.
///
/// # Note
///
/// This type is not optimized for production use, the whole state sits
/// behind a single mutex. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestAgentService {
    state: Arc<Mutex<State>>,
}

impl TestAgentService {
    /// Appends a step to the run script.
    pub fn push_step(&self, step: RunStep) {
        self.state.lock().unwrap().script.push_back(step);
    }

    /// Appends an assistant message directly to the thread.
    pub fn push_assistant_message<S: Into<String>>(&self, text: S) {
        self.state.lock().unwrap().messages.push(ThreadMessage {
            role: MessageRole::Assistant,
            text: text.into(),
            attachments: vec![],
        });
    }

    /// Returns the agent definitions this service has created.
    pub fn created_agents(&self) -> Vec<AgentSpec> {
        self.state.lock().unwrap().created_agents.clone()
    }

    /// Returns every batch of tool outputs submitted so far.
    pub fn submitted_outputs(&self) -> Vec<Vec<ToolOutput>> {
        self.state.lock().unwrap().submitted_outputs.clone()
    }

    /// Returns the ids of agents deleted so far.
    pub fn deleted_agents(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted_agents.clone()
    }

    /// Returns the `(file_id, dest)` pairs passed to `save_file`.
    pub fn saved_files(&self) -> Vec<(String, PathBuf)> {
        self.state.lock().unwrap().saved_files.clone()
    }

    fn advance(&self) -> Result<Run, Error> {
        let mut state = self.state.lock().unwrap();
        let Some(step) = state.script.pop_front() else {
            return Err(Error {
                message: "run script exhausted",
                kind: ErrorKind::Other,
            });
        };
        match step {
            RunStep::Status(status) => Ok(Run {
                id: "run:1".to_owned(),
                status,
                required_action: vec![],
                last_error: None,
            }),
            RunStep::RequiresAction(calls) => Ok(Run {
                id: "run:1".to_owned(),
                status: RunStatus::RequiresAction,
                required_action: calls,
                last_error: None,
            }),
            RunStep::Fail(kind) => Err(Error {
                message: "scripted failure",
                kind,
            }),
        }
    }
}

impl AgentService for TestAgentService {
    type Error = Error;

    fn create_agent(
        &self,
        spec: &AgentSpec,
    ) -> impl Future<Output = Result<RemoteAgent, Self::Error>> + Send + 'static
    {
        let mut state = self.state.lock().unwrap();
        state.next_agent_id += 1;
        let agent = RemoteAgent {
            id: format!("agent:{}", state.next_agent_id),
            name: spec.name.clone(),
        };
        state.created_agents.push(spec.clone());
        ready(Ok(agent))
    }

    fn create_thread(
        &self,
    ) -> impl Future<Output = Result<Thread, Self::Error>> + Send + 'static
    {
        ready(Ok(Thread {
            id: "thread:1".to_owned(),
        }))
    }

    fn create_message(
        &self,
        _thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static {
        self.state.lock().unwrap().messages.push(ThreadMessage {
            role,
            text: content.to_owned(),
            attachments: vec![],
        });
        ready(Ok(()))
    }

    fn create_run(
        &self,
        _thread_id: &str,
        _agent_id: &str,
        _additional_instructions: Option<&str>,
    ) -> impl Future<Output = Result<Run, Self::Error>> + Send + 'static {
        ready(self.advance())
    }

    fn get_run(
        &self,
        _thread_id: &str,
        _run_id: &str,
    ) -> impl Future<Output = Result<Run, Self::Error>> + Send + 'static {
        ready(self.advance())
    }

    fn submit_tool_outputs(
        &self,
        _thread_id: &str,
        _run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> impl Future<Output = Result<Run, Self::Error>> + Send + 'static {
        {
            let mut state = self.state.lock().unwrap();
            for output in &outputs {
                state.messages.push(ThreadMessage {
                    role: MessageRole::Assistant,
                    text: output.output.clone(),
                    attachments: vec![],
                });
            }
            state.submitted_outputs.push(outputs);
        }
        ready(self.advance())
    }

    fn list_messages(
        &self,
        _thread_id: &str,
    ) -> impl Future<Output = Result<Vec<ThreadMessage>, Self::Error>> + Send + 'static
    {
        ready(Ok(self.state.lock().unwrap().messages.clone()))
    }

    fn delete_agent(
        &self,
        agent_id: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static {
        self.state
            .lock()
            .unwrap()
            .deleted_agents
            .push(agent_id.to_owned());
        ready(Ok(()))
    }

    fn save_file(
        &self,
        file_id: &str,
        dest: &Path,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static {
        self.state
            .lock()
            .unwrap()
            .saved_files
            .push((file_id.to_owned(), dest.to_path_buf()));
        ready(Ok(()))
    }
}
