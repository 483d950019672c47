pub mod categorize;
pub mod error;
pub mod summary;
