use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::pin::Pin;

use hosted_agent_service::ToolDefinition;
use serde_json::Value;

use crate::tool::{AnyTool, Tool, ToolObject, ToolResult};

/// Error returned when a tool fails registration validation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegistryError {
    /// Another tool with the same name is already registered.
    DuplicateName(String),
    /// The tool's parameter schema is not a JSON object schema.
    InvalidSchema(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName(name) => {
                write!(f, "tool `{name}` is already registered")
            }
            RegistryError::InvalidSchema(name) => {
                write!(
                    f,
                    "tool `{name}` does not declare an object parameter schema"
                )
            }
        }
    }
}

impl StdError for RegistryError {}

/// A typed registry mapping tool names to their handlers.
///
/// Registration validates the tool against the schema it declares, so a
/// handler and its service-side declaration cannot diverge: the
/// definitions submitted to the service are derived from the registered
/// handlers themselves.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn ToolObject>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, validating its name and parameter schema.
    pub fn register<T: Tool>(&mut self, tool: T) -> Result<(), RegistryError> {
        let name = tool.name().to_owned();
        let is_object_schema = tool
            .parameter_schema()
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|ty| ty == "object");
        if !is_object_schema {
            return Err(RegistryError::InvalidSchema(name));
        }
        if self.tools.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.tools.insert(name, Box::new(AnyTool(tool)));
        Ok(())
    }

    /// Returns the function tool definitions to declare to the service.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition::Function {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect()
    }

    /// Starts executing the named tool with the given arguments.
    ///
    /// Returns `None` if no tool with that name is registered.
    pub(crate) fn dispatch(
        &self,
        name: &str,
        arguments: Value,
    ) -> Option<Pin<Box<dyn Future<Output = ToolResult> + Send>>> {
        let tool = self.tools.get(name)?;
        Some(tool.execute(arguments))
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use serde_json::json;

    use super::*;
    use crate::tool::Error;

    struct TestTool {
        name: &'static str,
        parameter_schema: Value,
    }

    impl TestTool {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                parameter_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            }
        }
    }

    impl Tool for TestTool {
        type Input = Value;

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "A test tool"
        }

        fn parameter_schema(&self) -> &Value {
            &self.parameter_schema
        }

        fn execute(
            &self,
            _input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            ready(Ok("success".to_owned()))
        }
    }

    #[test]
    fn test_register_and_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(TestTool::new("test_tool")).unwrap();

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].function_name(), Some("test_tool"));

        assert!(registry.dispatch("test_tool", json!({})).is_some());
        assert!(registry.dispatch("missing_tool", json!({})).is_none());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(TestTool::new("test_tool")).unwrap();

        let err = registry.register(TestTool::new("test_tool")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("test_tool".to_owned()));
    }

    #[test]
    fn test_non_object_schemas_are_rejected() {
        struct BadSchemaTool {
            parameter_schema: Value,
        }

        impl Tool for BadSchemaTool {
            type Input = Value;

            fn name(&self) -> &str {
                "bad_schema"
            }

            fn description(&self) -> &str {
                "A tool with a scalar schema"
            }

            fn parameter_schema(&self) -> &Value {
                &self.parameter_schema
            }

            fn execute(
                &self,
                _input: Self::Input,
            ) -> impl Future<Output = ToolResult> + Send + 'static {
                ready(Ok(String::new()))
            }
        }

        let mut registry = ToolRegistry::new();
        let err = registry
            .register(BadSchemaTool {
                parameter_schema: json!({ "type": "string" }),
            })
            .unwrap_err();
        assert_eq!(err, RegistryError::InvalidSchema("bad_schema".to_owned()));
    }

    #[tokio::test]
    async fn test_malformed_arguments_become_invalid_input() {
        #[derive(serde::Deserialize)]
        struct StrictInput {
            #[allow(dead_code)]
            text: String,
        }

        struct StrictTool {
            parameter_schema: Value,
        }

        impl Tool for StrictTool {
            type Input = StrictInput;

            fn name(&self) -> &str {
                "strict"
            }

            fn description(&self) -> &str {
                "A tool with a required field"
            }

            fn parameter_schema(&self) -> &Value {
                &self.parameter_schema
            }

            fn execute(
                &self,
                _input: Self::Input,
            ) -> impl Future<Output = ToolResult> + Send + 'static {
                ready(Ok("ok".to_owned()))
            }
        }

        let mut registry = ToolRegistry::new();
        registry
            .register(StrictTool {
                parameter_schema: json!({ "type": "object" }),
            })
            .unwrap();

        let result = registry
            .dispatch("strict", json!({ "bogus": 1 }))
            .unwrap()
            .await;
        let err: Error = result.unwrap_err();
        assert_eq!(err.kind(), crate::tool::ErrorKind::InvalidInput);
    }
}
