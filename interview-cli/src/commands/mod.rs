pub mod config;
pub mod profiles;
pub mod serve;
