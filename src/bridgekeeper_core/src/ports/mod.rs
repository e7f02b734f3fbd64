pub mod identity_source;
pub mod request_context;
