//! `ledgerly-auth` — authentication boundary: credentials, tokens, identity.
//!
//! This crate is intentionally decoupled from HTTP and storage drivers. It
//! defines the `UserStore` seam, hashes/verifies passwords, and issues and
//! validates bearer tokens.

pub mod password;
pub mod service;
pub mod store;
pub mod token;
pub mod user;

pub use service::{AuthService, AuthSession};
pub use store::UserStore;
pub use token::{Claims, TokenIdentity, TokenSigner};
pub use user::{PublicUser, User};
