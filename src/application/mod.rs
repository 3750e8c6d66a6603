pub mod evaluators;
pub mod extract;
pub mod hunt;
pub mod preferences;
