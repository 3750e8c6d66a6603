pub mod migrations;
pub mod preference_repo;
