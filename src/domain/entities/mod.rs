pub mod poll_state;
pub mod transaction;
pub mod watch_target;
