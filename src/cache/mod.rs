//! Keyed read cache for list queries.
//!
//! The cache is a plain value owned by each application state machine; there
//! is no global client. It never performs I/O itself. Instead, operations that
//! need data return [`FetchRequest`]s which the runtime executes, and the
//! outcome comes back through [`QueryCache::resolve`].
//!
//! # Guarantees
//!
//! - At most one in-flight fetch per key. A second `get` of an in-flight key
//!   returns no request.
//! - Last request wins. Every issued request carries a per-cache sequence
//!   number; a response whose sequence is not the latest issued for its key
//!   is discarded.
//! - Keep previous data. While the observed key has no value of its own, the
//!   most recent value of a previously observed key is exposed as a
//!   placeholder.

pub mod query_cache;

pub use query_cache::{
    CacheEntry, CacheOptions, CacheStatus, FetchRequest, QueryCache, QuerySnapshot,
};
