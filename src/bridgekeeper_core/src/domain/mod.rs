pub mod authenticated_principal;
pub mod correlation_key;
pub mod credential_request;
pub mod external_user;
pub mod failure;
pub mod role;
pub mod token;
pub mod username;
