pub mod generate;
pub mod summary;
