//! Filegate - a minimal HTTP/1.1 file store
//!
//! Exposes a directory over GET/HEAD/POST/PUT/DELETE, gated by a flat
//! access-list file.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod store;
