//! Client-side credential handling.
//!
//! The backend issues a signed JWT at login/registration; this module stores
//! it, decodes its claims locally (without signature verification, which
//! only the backend can perform), and answers validity checks for the route
//! guard and the request client.

mod claims;
mod storage;
mod store;

pub use claims::TokenClaims;
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StoredCredential};
pub use store::TokenStore;
