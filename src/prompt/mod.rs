//! Prompt generation.
//!
//! - **Template**: `{variable}` substitution engine
//! - **Templates**: the fixed per-kind prompt text
//! - **Builder**: request → prompt, including required-flag checks

mod builder;
mod template;
mod templates;

pub use builder::build_prompt;
