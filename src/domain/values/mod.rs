pub mod decision;
pub mod extracted;
pub mod hunt_mode;
pub mod server;
pub mod threshold;
