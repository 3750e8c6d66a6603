pub mod log;
pub mod sendgrid;
