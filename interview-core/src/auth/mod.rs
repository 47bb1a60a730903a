//! Session-bound bearer credentials (HS256 JWT)

mod config;
mod context;
mod error;
mod validator;

pub use config::{AuthConfig, DEV_SECRET};
pub use context::{Credential, SessionClaims};
pub use error::AuthError;
pub use validator::CredentialIssuer;
