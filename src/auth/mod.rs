//! Authentication module
//!
//! The `Authenticator` capability decorates outgoing requests with
//! credentials. Showpad uses a static bearer token.

mod authenticator;

pub use authenticator::{Authenticator, BearerTokenAuthenticator};
