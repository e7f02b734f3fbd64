pub mod external_login_provider;

pub use external_login_provider::ExternalLoginProvider;
