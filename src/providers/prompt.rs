/// The system instruction sent to every provider.
///
/// It pins the output to a single JSON object in the manual's shape, asks
/// for an English/Simplified Chinese pair at every leaf and lays out the
/// content rules for each section. Every adapter sends this exact text so
/// that replies from different backends stay comparable.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// The instruction pair for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// System and user instruction joined into one message, for backends
    /// that take a single text part.
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }
}

/// Build the prompt for a word. Callers trim the word beforehand.
pub fn build_prompt(word: &str) -> Prompt {
    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user: format!("Generate the game manual for the word: \"{}\"", word),
    }
}
