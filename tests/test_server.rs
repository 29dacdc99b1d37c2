//! End-to-end tests over a real socket

use filegate::config::Config;
use filegate::server::Server;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct Running {
    dir: tempfile::TempDir,
    addr: SocketAddr,
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<anyhow::Result<()>>,
}

async fn start(max_request_bytes: usize) -> Running {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("server_lists.serverconf"),
        "[whitelist]\n./index.html\n./note.txt\n[post_put_list]\n./note.txt\n[deletelist]\n./note.txt\n",
    )
    .unwrap();

    let mut cfg = Config::default();
    cfg.server.listen_addr = "127.0.0.1:0".to_string();
    cfg.server.root = dir.path().to_path_buf();
    cfg.server.max_request_bytes = max_request_bytes;

    let server = Server::bind(&cfg).await.unwrap();
    let addr = server.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run_until(async move {
        let _ = stopped.await;
    }));

    Running {
        dir,
        addr,
        stop: Some(stop),
        handle,
    }
}

async fn roundtrip(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_get_over_socket() {
    let srv = start(2048).await;
    std::fs::write(srv.dir.path().join("index.html"), "<p>hi</p>").unwrap();

    let response = roundtrip(srv.addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert_eq!(
        response,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 9\r\n\r\n<p>hi</p>".to_vec()
    );
}

#[tokio::test]
async fn test_post_append_delete_over_socket() {
    let srv = start(2048).await;

    let created = roundtrip(
        srv.addr,
        b"POST /note.txt HTTP/1.1\r\nContent-Type: text/plain\r\n\r\nhello",
    )
    .await;
    assert_eq!(created, b"HTTP/1.1 201 Created\r\n".to_vec());

    let appended = roundtrip(
        srv.addr,
        b"POST /note.txt HTTP/1.1\r\nContent-Type: text/plain\r\nAppend-Position: line=1, pos=5\r\n\r\n world",
    )
    .await;
    assert!(appended.starts_with(b"HTTP/1.1 201 Created\r\n"));
    assert_eq!(
        std::fs::read_to_string(srv.dir.path().join("note.txt")).unwrap(),
        "hello world\n"
    );

    let deleted = roundtrip(srv.addr, b"DELETE /note.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(deleted, b"HTTP/1.1 204 No Content\r\n".to_vec());
    assert!(!srv.dir.path().join("note.txt").exists());
}

#[tokio::test]
async fn test_oversized_request_gets_no_response() {
    let srv = start(64).await;

    let mut request = b"PUT /big.txt HTTP/1.1\r\n\r\n".to_vec();
    request.extend(std::iter::repeat_n(b'x', 128));

    let mut stream = TcpStream::connect(srv.addr).await.unwrap();
    stream.write_all(&request).await.unwrap();

    // The server closes with unread input pending, which may surface as a reset
    let mut response = Vec::new();
    let _ = stream.read_to_end(&mut response).await;

    assert!(response.is_empty());
    assert!(!srv.dir.path().join("big.txt").exists());
}

#[tokio::test]
async fn test_concurrent_appends_are_serialized() {
    let srv = start(2048).await;
    std::fs::write(srv.dir.path().join("note.txt"), "").unwrap();

    let mut tasks = Vec::new();
    for i in 0..16 {
        let addr = srv.addr;
        tasks.push(tokio::spawn(async move {
            let request = format!(
                "POST /note.txt HTTP/1.1\r\nContent-Type: text/plain\r\n\r\nline-{i}"
            );
            roundtrip(addr, request.as_bytes()).await
        }));
    }
    for task in tasks {
        let response = task.await.unwrap();
        assert!(response.starts_with(b"HTTP/1.1 201 Created\r\n"));
    }

    let contents = std::fs::read_to_string(srv.dir.path().join("note.txt")).unwrap();
    assert_eq!(contents.lines().count(), 16);
    for i in 0..16 {
        assert!(contents.lines().any(|l| l == format!("line-{i}")));
    }
}

#[tokio::test]
async fn test_shutdown_stops_accept_loop() {
    let mut srv = start(2048).await;

    srv.stop.take().unwrap().send(()).unwrap();
    srv.handle.await.unwrap().unwrap();

    assert!(TcpStream::connect(srv.addr).await.is_err());
}

#[tokio::test]
async fn test_bind_failure_is_error() {
    let first = start(2048).await;

    let mut cfg = Config::default();
    cfg.server.listen_addr = first.addr.to_string();

    assert!(Server::bind(&cfg).await.is_err());
}
