pub mod history;
pub mod llm_client;
pub mod prompts;
pub mod reply_parser;
pub mod request_builder;
pub mod submission;
pub mod therapist;
