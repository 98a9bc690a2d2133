mod system;

pub use system::{TRANSLATOR_PROMPT_TEXT, system, user_query};
