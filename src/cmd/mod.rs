pub mod generate;
pub mod settings;
