pub mod authentication;
pub mod config;
pub mod identity;
pub mod request_context;
