//! Request extractors and layers

mod auth;

pub use auth::BearerToken;
