// ATS Analysis — scores a resume against ATS criteria, optionally targeted
// at a job description. All LLM calls go through llm_client.
//
// The backend's JSON is validated at this boundary; nothing unvalidated
// escapes this module.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod store;
pub mod validation;
