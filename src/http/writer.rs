use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Frames a response for the wire.
///
/// An empty body with no extra headers is exactly the status line. Otherwise
/// the extra headers come first, then `Content-Type` and `Content-Length`
/// when there is a body, then the blank line and the body.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    buf.extend_from_slice(resp.status_line().as_bytes());
    buf.extend_from_slice(b"\r\n");

    for (k, v) in &resp.headers {
        write_header(&mut buf, k, v);
    }

    if !resp.body.is_empty() {
        write_header(&mut buf, "Content-Type", &resp.content_type);
        write_header(&mut buf, "Content-Length", &resp.body.len().to_string());
    }

    if !resp.headers.is_empty() || !resp.body.is_empty() {
        // Header/body separator
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(&resp.body);
    }

    buf
}

fn write_header(buf: &mut Vec<u8>, key: &str, value: &str) {
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::StatusCode;

    #[tokio::test]
    async fn writes_whole_buffer() {
        let resp = Response::message(StatusCode::NotFound, "gone");
        let mut out: Vec<u8> = Vec::new();

        ResponseWriter::new(&resp).write_to_stream(&mut out).await.unwrap();

        assert_eq!(out, serialize_response(&resp));
    }
}
