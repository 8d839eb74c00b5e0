pub mod category;
pub mod document;
pub mod notes;
pub mod prompt;
pub mod release;
pub mod ticket;
pub mod upstream;
