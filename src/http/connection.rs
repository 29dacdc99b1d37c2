use bytes::BytesMut;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::http::writer::ResponseWriter;
use crate::server::dispatcher::Dispatcher;

/// One client connection: a single bounded read, one response, then close.
pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    max_request_bytes: usize,
    dispatcher: Arc<Dispatcher>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing,
    Writing(ResponseWriter),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, dispatcher: Arc<Dispatcher>, max_request_bytes: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(max_request_bytes),
            max_request_bytes,
            dispatcher,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = if self.read_request().await? {
                        ConnectionState::Processing
                    } else {
                        ConnectionState::Closed
                    };
                }

                ConnectionState::Processing => {
                    let response = self.dispatcher.evaluate(&self.buffer).await;
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // No keep-alive: one request per connection
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!("Shutdown after response failed: {}", e);
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Performs the one read this connection gets.
    ///
    /// Returns `false` when there is nothing to answer: the peer closed
    /// without sending, or the request filled the whole buffer and is
    /// treated as oversized.
    async fn read_request(&mut self) -> anyhow::Result<bool> {
        self.buffer.resize(self.max_request_bytes, 0);
        let n = self.stream.read(&mut self.buffer[..]).await?;
        self.buffer.truncate(n);

        if n == 0 {
            return Ok(false);
        }

        if n >= self.max_request_bytes {
            tracing::warn!(
                limit = self.max_request_bytes,
                "Request does not fit the read buffer, dropping connection"
            );
            return Ok(false);
        }

        Ok(true)
    }
}
