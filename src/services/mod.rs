pub mod export_writer;
pub mod llm_service;
pub mod summarizer;

pub use export_writer::{ExportWriter, ScoreRow, ScoreSheet, NO_COMMENT};
pub use llm_service::LlmSummarizer;
pub use summarizer::Summarizer;
