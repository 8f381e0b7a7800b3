// Resume Enhancement — rewrites the resume applying only the user-selected
// suggestions, and emits the downloadable artifacts for the final text.

pub mod enhancer;
pub mod handlers;
pub mod prompts;
