//! Serving
//!
//! `listener` owns the socket and spawns a task per connection;
//! `dispatcher` turns each request into a response.

pub mod dispatcher;
pub mod listener;

pub use dispatcher::Dispatcher;
pub use listener::Server;
