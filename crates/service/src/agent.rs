use serde_json::Value;

/// A declarative definition for creating a remote agent.
///
/// The service owns the resulting agent record; this type only carries
/// what the caller wants the agent to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentSpec {
    /// Display name of the agent.
    pub name: String,
    /// The standing instructions for the agent.
    pub instructions: String,
    /// The model deployment the agent is bound to.
    pub model: String,
    /// Tools that are available to the agent.
    pub tools: Vec<ToolDefinition>,
}

/// Describes a tool that can be attached to an agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolDefinition {
    /// A function tool that the caller executes locally when the run
    /// requires action.
    Function {
        /// Name of the tool.
        name: String,
        /// Description of the tool.
        description: String,
        /// Parameters definition of the tool.
        ///
        /// For most services, the parameters should typically be
        /// defined by a [JSON schema](https://json-schema.org/).
        parameters: Value,
    },
    /// The service's built-in code execution tool.
    CodeInterpreter,
}

impl ToolDefinition {
    /// Returns the function name if this is a function tool.
    #[inline]
    pub fn function_name(&self) -> Option<&str> {
        match self {
            ToolDefinition::Function { name, .. } => Some(name),
            ToolDefinition::CodeInterpreter => None,
        }
    }
}

/// A service-owned agent record returned by `create_agent`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RemoteAgent {
    /// The service-assigned agent identifier.
    pub id: String,
    /// The agent's display name.
    pub name: String,
}
