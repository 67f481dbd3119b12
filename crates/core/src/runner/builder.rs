use std::time::Duration;

use hosted_agent_service::{AgentService, RunStatus};

use super::{Runner, Sleeper, TokioSleeper};
use crate::tool::ToolRegistry;

/// [`Runner`] builder.
pub struct RunnerBuilder<S, SL = TokioSleeper> {
    service: S,
    registry: ToolRegistry,
    sleeper: SL,
    poll_interval: Duration,
    on_status: Option<Box<dyn Fn(&RunStatus) + Send + Sync>>,
}

impl<S: AgentService> RunnerBuilder<S> {
    /// Creates a new builder with the specified service.
    #[inline]
    pub fn with_service(service: S) -> Self {
        Self {
            service,
            registry: ToolRegistry::new(),
            sleeper: TokioSleeper,
            poll_interval: Duration::from_secs(1),
            on_status: None,
        }
    }
}

impl<S, SL> RunnerBuilder<S, SL> {
    /// Sets the tool registry answering the run's tool calls.
    #[inline]
    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the delay between run status polls.
    #[inline]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Replaces the sleeper used between polls.
    #[inline]
    pub fn sleeper<NewSL: Sleeper>(
        self,
        sleeper: NewSL,
    ) -> RunnerBuilder<S, NewSL> {
        RunnerBuilder {
            service: self.service,
            registry: self.registry,
            sleeper,
            poll_interval: self.poll_interval,
            on_status: self.on_status,
        }
    }

    /// Attaches a callback to be invoked for every observed run status.
    #[inline]
    pub fn on_status(
        mut self,
        on_status: impl Fn(&RunStatus) + Send + Sync + 'static,
    ) -> Self {
        self.on_status = Some(Box::new(on_status));
        self
    }

    /// Builds the runner.
    #[inline]
    pub fn build(self) -> Runner<S, SL> {
        Runner {
            service: self.service,
            registry: self.registry,
            sleeper: self.sleeper,
            poll_interval: self.poll_interval,
            on_status: self.on_status,
        }
    }
}
