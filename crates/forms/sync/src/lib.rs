//! Post-submission synchronisation.
//!
//! After a successful submission the affected read caches are invalidated
//! and, for a self-update, the signed-in user's session record is patched in
//! place. The boundary traits ([`CacheStore`], [`IdentityStore`],
//! [`NotificationSink`]) are implemented by the embedding UI; the in-memory
//! versions here serve tests and headless use.

#![deny(unsafe_code)]

mod bridge;
mod memory;
mod notify;
mod resolver;
mod store;

pub use bridge::{CacheSyncBridge, SyncReport};
pub use memory::{MemoryCache, SessionStore};
pub use notify::{RecordingNotifier, TracingNotifier};
pub use resolver::{Extractor, IdentityResolver};
pub use store::{CacheStore, IdentityStore, NotificationSink};
