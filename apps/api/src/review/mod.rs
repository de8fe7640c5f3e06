// Review generation and management.
// All completion calls go through llm_client::TextGenerator.

pub mod generator;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
pub mod quote_usage;
pub mod repository;
pub mod validation;
