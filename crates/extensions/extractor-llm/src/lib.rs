//! LLM-backed filter extractor for propsearch.
//!
//! Talks to any OpenAI-compatible chat-completions endpoint (Groq by
//! default) in JSON mode and maps the answer onto [`ExtractedFields`].
//!
//! [`ExtractedFields`]: propsearch_protocols::ExtractedFields

mod api;
mod extractor;
mod parser;
mod prompt;

pub use extractor::{
    DisabledExtractor, LlmExtractorConfig, LlmFilterExtractor, DEFAULT_EXTRACTOR_MODEL,
    DEFAULT_EXTRACTOR_URL,
};
pub use parser::parse_fields;
pub use prompt::build_prompt;
