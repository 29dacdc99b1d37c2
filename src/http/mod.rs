//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 layer: one request per connection, read in
//! a single bounded read, answered, then closed.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine (read, evaluate, write, close)
//! - **`parser`**: Splits raw request bytes into method, path, headers and body
//! - **`request`**: HTTP request representation
//! - **`response`**: Status codes, reason phrases and the response builder
//! - **`writer`**: Frames a response for the wire and writes it out
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read, capped at max_request_bytes
//!        └──────┬──────┘
//!               │ Request bytes received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse and dispatch
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut the socket down
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Wire framing
//!
//! A response with an empty body and no extra headers is exactly the status
//! line, e.g. `HTTP/1.1 204 No Content\r\n`. Existing clients depend on this.

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
