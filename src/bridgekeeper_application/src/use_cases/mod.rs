pub mod refresh_user;
pub mod sign_on;
