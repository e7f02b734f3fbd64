pub mod http_identity_source;
pub mod in_memory_identity_source;

pub use http_identity_source::{HttpIdentitySource, HttpIdentitySourceError};
pub use in_memory_identity_source::{InMemoryIdentitySource, InMemoryIdentitySourceError};
