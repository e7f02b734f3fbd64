pub mod provider_manager;
pub mod use_cases;

pub use provider_manager::ProviderManager;
pub use use_cases::{
    refresh_user::{RefreshUserError, RefreshUserUseCase},
    sign_on::{SignOnError, SignOnUseCase},
};
