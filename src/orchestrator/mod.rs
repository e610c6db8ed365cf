pub mod cli_mapper;
pub mod model_selector;
pub mod openrouter;
pub mod tool_runner;

pub use model_selector::ModelSelector;
pub use openrouter::{ModelCatalog, OpenRouterClient};
pub use tool_runner::{AssistantTool, ToolOutput, ToolRunner};
