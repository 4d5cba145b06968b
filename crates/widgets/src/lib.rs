pub mod menu;
pub mod meter;
pub mod prompt;

pub use menu::{ContextMenu, MenuEntry};
pub use meter::UsageMeter;
pub use prompt::{parse_percentage, PercentPrompt, PromptError, PROMPT_INPUT};
