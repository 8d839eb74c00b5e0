pub mod file_store;
pub mod jira;
pub mod llm;
pub mod memory;
pub mod upstream;
