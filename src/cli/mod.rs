pub mod commands;
pub mod prompt;
pub mod setup;
