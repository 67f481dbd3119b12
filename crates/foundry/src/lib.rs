//! An agents-service client for Azure AI Foundry compatible APIs.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::path::Path;
use std::sync::Arc;

use hosted_agent_service::{
    AgentService, AgentSpec, ErrorKind, MessageRole, RemoteAgent, Run,
    ServiceError, Thread, ThreadMessage, ToolOutput,
};
use mime::Mime;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;

pub use config::{Credential, FoundryConfig, FoundryConfigBuilder};

/// Error type for [`FoundryService`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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

fn status_error_kind(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ErrorKind::Unauthorized
        }
        StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimitExceeded,
        _ => ErrorKind::Other,
    }
}

fn check_response(
    resp_res: Result<Response, reqwest::Error>,
) -> Result<Response, Error> {
    let resp = resp_res
        .map_err(|err| Error::new(format!("{err}"), ErrorKind::Other))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::new(
            format!("unexpected status: {status}"),
            status_error_kind(status),
        ));
    }
    Ok(resp)
}

async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let is_valid_content_type = content_type
        .and_then(|v| v.parse().ok())
        .map(|m: Mime| m.subtype() == mime::JSON)
        .unwrap_or(false);
    if !is_valid_content_type {
        return Err(Error::new(
            format!("Unexpected content type: {content_type:?}"),
            ErrorKind::Other,
        ));
    }
    resp.json::<T>()
        .await
        .map_err(|err| Error::new(format!("{err}"), ErrorKind::Other))
}

/// A client for an Azure AI Foundry agents endpoint.
#[derive(Clone, Debug)]
pub struct FoundryService {
    client: Client,
    config: Arc<FoundryConfig>,
}

impl FoundryService {
    /// Creates a new `FoundryService` with the given configuration.
    #[inline]
    pub fn new(config: FoundryConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.config.endpoint, path))
            .query(&[("api-version", self.config.api_version.as_str())])
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.credential.token()),
            )
    }
}

impl AgentService for FoundryService {
    type Error = Error;

    fn create_agent(
        &self,
        spec: &AgentSpec,
    ) -> impl Future<Output = Result<RemoteAgent, Self::Error>> + Send + 'static
    {
        let payload = proto::create_agent_request(spec);
        let fallback_name = spec.name.clone();
        let resp_fut = self
            .request(Method::POST, "assistants")
            .json(&payload)
            .send();

        async move {
            let resp = check_response(resp_fut.await)?;
            let agent: proto::AgentObject = decode_json(resp).await?;
            trace!("created agent: {}", agent.id);
            Ok(RemoteAgent {
                id: agent.id,
                name: agent.name.unwrap_or(fallback_name),
            })
        }
    }

    fn create_thread(
        &self,
    ) -> impl Future<Output = Result<Thread, Self::Error>> + Send + 'static
    {
        let resp_fut = self
            .request(Method::POST, "threads")
            .json(&serde_json::json!({}))
            .send();

        async move {
            let resp = check_response(resp_fut.await)?;
            let thread: proto::ThreadObject = decode_json(resp).await?;
            trace!("created thread: {}", thread.id);
            Ok(Thread { id: thread.id })
        }
    }

    fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static {
        let payload = proto::create_message_request(&role, content);
        let resp_fut = self
            .request(Method::POST, &format!("threads/{thread_id}/messages"))
            .json(&payload)
            .send();

        async move {
            check_response(resp_fut.await)?;
            Ok(())
        }
    }

    fn create_run(
        &self,
        thread_id: &str,
        agent_id: &str,
        additional_instructions: Option<&str>,
    ) -> impl Future<Output = Result<Run, Self::Error>> + Send + 'static {
        let payload =
            proto::create_run_request(agent_id, additional_instructions);
        let resp_fut = self
            .request(Method::POST, &format!("threads/{thread_id}/runs"))
            .json(&payload)
            .send();

        async move {
            let resp = check_response(resp_fut.await)?;
            let run: proto::RunObject = decode_json(resp).await?;
            Ok(proto::convert_run(run))
        }
    }

    fn get_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> impl Future<Output = Result<Run, Self::Error>> + Send + 'static {
        let resp_fut = self
            .request(
                Method::GET,
                &format!("threads/{thread_id}/runs/{run_id}"),
            )
            .send();

        async move {
            let resp = check_response(resp_fut.await)?;
            let run: proto::RunObject = decode_json(resp).await?;
            Ok(proto::convert_run(run))
        }
    }

    fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> impl Future<Output = Result<Run, Self::Error>> + Send + 'static {
        let payload = proto::submit_tool_outputs_request(outputs);
        let resp_fut = self
            .request(
                Method::POST,
                &format!(
                    "threads/{thread_id}/runs/{run_id}/submit_tool_outputs"
                ),
            )
            .json(&payload)
            .send();

        async move {
            let resp = check_response(resp_fut.await)?;
            let run: proto::RunObject = decode_json(resp).await?;
            Ok(proto::convert_run(run))
        }
    }

    fn list_messages(
        &self,
        thread_id: &str,
    ) -> impl Future<Output = Result<Vec<ThreadMessage>, Self::Error>> + Send + 'static
    {
        let resp_fut = self
            .request(Method::GET, &format!("threads/{thread_id}/messages"))
            .query(&[("order", "asc")])
            .send();

        async move {
            let resp = check_response(resp_fut.await)?;
            let list: proto::MessageList = decode_json(resp).await?;
            Ok(proto::convert_messages(list))
        }
    }

    fn delete_agent(
        &self,
        agent_id: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static {
        let resp_fut = self
            .request(Method::DELETE, &format!("assistants/{agent_id}"))
            .send();

        async move {
            check_response(resp_fut.await)?;
            Ok(())
        }
    }

    fn save_file(
        &self,
        file_id: &str,
        dest: &Path,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static {
        let dest = dest.to_path_buf();
        let resp_fut = self
            .request(Method::GET, &format!("files/{file_id}/content"))
            .send();

        async move {
            let resp = check_response(resp_fut.await)?;
            let bytes = resp.bytes().await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::Other)
            })?;
            tokio::fs::write(&dest, &bytes).await.map_err(|err| {
                Error::new(
                    format!("failed to write {}: {err}", dest.display()),
                    ErrorKind::Other,
                )
            })?;
            Ok(())
        }
    }
}
