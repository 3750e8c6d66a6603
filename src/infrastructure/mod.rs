pub mod clock;
pub mod http;
pub mod notify;
pub mod sqlite;
