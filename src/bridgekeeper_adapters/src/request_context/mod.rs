pub mod form_request_context;

pub use form_request_context::{FormRequestContext, NoRequestContext};
