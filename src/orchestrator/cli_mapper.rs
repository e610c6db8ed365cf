//! Maps assistant invocations to command-line arguments
//!
//! Arguments are passed to the child process as an array, never through a shell.

use crate::models::ModelDescriptor;

/// Routing prefix prepended to every model spec
pub const ROUTING_PREFIX: &str = "openrouter";

/// Arguments understood by the assistant CLI
#[derive(Debug, Clone)]
pub enum AssistantArg {
    /// Model spec (`openrouter/<provider>/<model>`)
    Model(String),
    /// API key for the routing service
    ApiKey(String),
    /// Task label
    Task(String),
    /// Free-text instruction (last positional arg)
    Instruction(String),
}

/// `openrouter/<provider>/<model>`
pub fn model_spec(model: &ModelDescriptor) -> String {
    format!("{}/{}/{}", ROUTING_PREFIX, model.provider, model.model)
}

/// Build CLI arguments; the instruction is always emitted last
pub fn build_args(args: &[AssistantArg]) -> Vec<String> {
    let mut cli_args = Vec::new();
    let mut instruction = None;

    for arg in args {
        match arg {
            AssistantArg::Model(spec) => {
                cli_args.push("--model".to_string());
                cli_args.push(spec.clone());
            }
            AssistantArg::ApiKey(key) => {
                cli_args.push("--api-key".to_string());
                cli_args.push(key.clone());
            }
            AssistantArg::Task(task) => {
                cli_args.push("--task".to_string());
                cli_args.push(task.clone());
            }
            AssistantArg::Instruction(text) => instruction = Some(text.clone()),
        }
    }

    if let Some(text) = instruction {
        cli_args.push(text);
    }

    cli_args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_spec() {
        let model = ModelDescriptor::new("openai", "gpt-4", "GPT-4", "implementation");
        assert_eq!(model_spec(&model), "openrouter/openai/gpt-4");
    }

    #[test]
    fn test_instruction_is_last_and_unquoted() {
        let args = build_args(&[
            AssistantArg::Instruction("it's a 'quoted' $(thing)".to_string()),
            AssistantArg::Model("openrouter/openai/gpt-4".to_string()),
            AssistantArg::ApiKey("sk-test".to_string()),
            AssistantArg::Task("create_hld".to_string()),
        ]);

        assert_eq!(
            args,
            vec![
                "--model",
                "openrouter/openai/gpt-4",
                "--api-key",
                "sk-test",
                "--task",
                "create_hld",
                "it's a 'quoted' $(thing)",
            ]
        );
    }
}
