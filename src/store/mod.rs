//! Filesystem-side logic
//!
//! Access-list checks, the positional append algorithm, and the per-path
//! lock table that serializes file mutations across connections.

pub mod access;
pub mod append;
pub mod locks;

pub use access::{AccessGate, Operation};
pub use append::{AppendError, AppendPosition, ColumnSpec, FileLines, LineSpec};
pub use locks::PathLocks;
