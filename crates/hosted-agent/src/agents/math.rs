//! The math agent preset.

use std::path::{Path, PathBuf};

use hosted_agent_core::{InteractionRequest, RunOutcome};
use hosted_agent_service::{AgentService, ToolDefinition};

/// The display name of the temporary math agent.
pub const AGENT_NAME: &str = "math-agent-v1";

const INSTRUCTIONS: &str = "You politely help with math questions. Use the \
    Code Interpreter tool when asked to visualize numbers.";

const DEFAULT_ADDITIONAL_INSTRUCTIONS: &str = "Please address the user as \
    Jane Doe. The user has a premium account.";

const IMAGE_OUTPUT_DIR: &str = "tmp/images";

/// Builds the interaction request for one math prompt.
pub fn interaction(
    model: &str,
    prompt: &str,
    additional_instructions: Option<String>,
    auto_delete_agent: bool,
) -> InteractionRequest {
    InteractionRequest {
        agent_name: AGENT_NAME.to_owned(),
        instructions: INSTRUCTIONS.to_owned(),
        model: model.to_owned(),
        builtin_tools: vec![ToolDefinition::CodeInterpreter],
        prompt: prompt.to_owned(),
        additional_instructions: additional_instructions
            .or_else(|| Some(DEFAULT_ADDITIONAL_INSTRUCTIONS.to_owned())),
        auto_delete_agent,
    }
}

/// Persists any image outputs to disk for easy inspection, returning
/// the saved paths.
pub async fn save_generated_images<S: AgentService>(
    service: &S,
    outcome: &RunOutcome,
) -> Vec<PathBuf> {
    save_images_to(service, outcome, Path::new(IMAGE_OUTPUT_DIR)).await
}

async fn save_images_to<S: AgentService>(
    service: &S,
    outcome: &RunOutcome,
    output_dir: &Path,
) -> Vec<PathBuf> {
    let attachments: Vec<_> = outcome
        .messages
        .iter()
        .flat_map(|message| &message.attachments)
        .collect();
    if attachments.is_empty() {
        return vec![];
    }

    if let Err(err) = tokio::fs::create_dir_all(output_dir).await {
        warn!("failed to create {}: {err}", output_dir.display());
        return vec![];
    }

    let mut saved = Vec::new();
    for attachment in attachments {
        let path =
            output_dir.join(format!("{}_image_file.png", attachment.file_id));
        match service.save_file(&attachment.file_id, &path).await {
            Ok(()) => saved.push(path),
            Err(err) => {
                warn!("failed to save image {}: {err}", attachment.file_id);
            }
        }
    }
    saved
}
