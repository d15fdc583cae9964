mod core;
pub mod prompt;
pub use self::core::*;
pub use prompt::EXAMPLE_PROMPTS;
