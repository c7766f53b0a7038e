pub mod auth;
pub mod generate;
