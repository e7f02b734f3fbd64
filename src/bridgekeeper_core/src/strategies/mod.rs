pub mod authentication_provider;
