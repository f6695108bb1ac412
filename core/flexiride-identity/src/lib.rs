//! Persistent identity store for the FlexiRide client.
//!
//! Holds a single serialized [`Session`](flexiride_types::Session) under a
//! fixed key so a signed-in user survives process restarts.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is the string key/value surface the store sits on
//!   (local-storage semantics: get, set, remove)
//! - [`FileKeyValueStore`] keeps one file per key in a data directory
//! - [`MemoryKeyValueStore`] keeps values in process memory
//! - [`IdentityStore`] encodes and decodes the session record and degrades to
//!   a no-op when no backend is reachable
//!
//! None of the [`IdentityStore`] operations fail: a missing backend, a
//! missing key and an unreadable record all read back as "no session".

mod backend;
mod error;
mod store;

pub use backend::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use error::{IdentityError, IdentityResult};
pub use store::{IdentityStore, USER_KEY};
