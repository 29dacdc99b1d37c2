//! Method dispatch
//!
//! Turns one parsed request into one response. Each method checks its
//! access list and preconditions, performs the file operation and reports
//! the outcome. Nothing is kept between requests except the filesystem and
//! the per-path lock table.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{FILE_MISSING, HEAD_FILE_MISSING, NOT_FOUND_PAGE, ServeError};
use crate::http::mime::content_type_for;
use crate::http::parser::parse_http_request;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::store::access::{AccessGate, Operation};
use crate::store::append::{AppendPosition, append_to_file};
use crate::store::locks::PathLocks;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats a timestamp as an HTTP-date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn http_date(t: DateTime<Utc>) -> String {
    t.format(HTTP_DATE_FORMAT).to_string()
}

type HandlerResult = Result<Response, ServeError>;

pub struct Dispatcher {
    root: PathBuf,
    gate: AccessGate,
    locks: PathLocks,
    guard_put: bool,
}

impl Dispatcher {
    /// Serves files under `root`, checking permissions against `gate`.
    pub fn new(root: impl Into<PathBuf>, gate: AccessGate) -> Self {
        Self {
            root: root.into(),
            gate,
            locks: PathLocks::new(),
            guard_put: false,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.server.root.clone(), AccessGate::new(cfg.list_file_path()))
            .with_put_guard(cfg.access.guard_put)
    }

    /// When set, PUT requires the write list like POST does.
    pub fn with_put_guard(mut self, guard_put: bool) -> Self {
        self.guard_put = guard_put;
        self
    }

    /// Parses raw request bytes and dispatches them.
    ///
    /// A request line without method or path short-circuits to 400.
    pub async fn evaluate(&self, raw: &[u8]) -> Response {
        match parse_http_request(raw) {
            Ok(req) => self.dispatch(&req).await,
            Err(e) => {
                warn!(error = %e, "Rejecting malformed request");
                let response = ServeError::from(e).into_response();
                info!("[SENDING] {}", response.status_line());
                response
            }
        }
    }

    pub async fn dispatch(&self, req: &Request) -> Response {
        let _guard = match req.method {
            Method::Unsupported(_) => None,
            _ => Some(self.locks.lock(&req.path).await),
        };

        let result = match &req.method {
            Method::GET => self.get(req).await,
            Method::HEAD => self.head(req).await,
            Method::POST => self.post(req).await,
            Method::PUT => self.put(req).await,
            Method::DELETE => self.delete(req).await,
            Method::Unsupported(verb) => Err(ServeError::NotImplemented(verb.clone())),
        };

        let response = result.unwrap_or_else(|e| {
            match &e {
                ServeError::NotImplemented(verb) => warn!(
                    method = %verb,
                    "Only GET, POST, PUT, DELETE and HEAD are supported"
                ),
                other => warn!(
                    method = %req.method,
                    path = %req.path,
                    error = %other,
                    "Request failed"
                ),
            }
            e.into_response()
        });

        info!(
            method = %req.method,
            path = %req.path,
            status = response.status.as_u16(),
            "[SENDING] {}",
            response.status_line()
        );

        response
    }

    fn resolve(&self, target: &str) -> PathBuf {
        self.root.join(target)
    }

    async fn require(&self, path: &str, op: Operation) -> Result<(), ServeError> {
        if self.gate.is_permitted(path, op).await {
            Ok(())
        } else {
            Err(ServeError::NotPermitted(op))
        }
    }

    async fn get(&self, req: &Request) -> HandlerResult {
        let path = self.resolve(&req.path);

        if !is_file(&path).await {
            return Err(ServeError::NotFound(NOT_FOUND_PAGE));
        }
        self.require(&req.path, Operation::Read).await?;

        let content = tokio::fs::read(&path).await?;
        Ok(Response::ok(content, content_type_for(&req.path)))
    }

    async fn head(&self, req: &Request) -> HandlerResult {
        let path = self.resolve(&req.path);

        let meta = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => meta,
            _ => return Err(ServeError::NotFound(HEAD_FILE_MISSING)),
        };
        self.require(&req.path, Operation::Read).await?;

        let modified: DateTime<Utc> = meta.modified()?.into();

        Ok(ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type_for(&req.path))
            .header("Content-Length", meta.len().to_string())
            .header("Date", http_date(Utc::now()))
            .header("Last-Modified", http_date(modified))
            .build())
    }

    async fn post(&self, req: &Request) -> HandlerResult {
        self.require(&req.path, Operation::Write).await?;

        let expected = content_type_for(&req.path);
        match req.header("content-type") {
            None => return Err(ServeError::MissingContentType),
            Some(got) if got != expected => {
                return Err(ServeError::ContentTypeMismatch {
                    expected,
                    got: got.to_string(),
                });
            }
            Some(_) => {}
        }

        let body = req.body().ok_or(ServeError::MissingBody)?;

        let position = match req.header("append-position") {
            Some(value) if !value.is_empty() => AppendPosition::parse(value)?,
            _ => AppendPosition::END,
        };
        debug!(path = %req.path, ?position, "Resolved append position");

        let path = self.resolve(&req.path);
        if tokio::fs::try_exists(&path).await? {
            append_to_file(&path, body, position).await?;
            return Ok(Response::message(
                StatusCode::Created,
                "Successfully appended to file",
            ));
        }

        tokio::fs::write(&path, body)
            .await
            .map_err(ServeError::Write)?;

        Ok(Response::status_only(StatusCode::Created))
    }

    async fn put(&self, req: &Request) -> HandlerResult {
        if self.guard_put {
            self.require(&req.path, Operation::Write).await?;
        }

        let body = req.body().ok_or(ServeError::MissingBody)?;

        tokio::fs::write(self.resolve(&req.path), body)
            .await
            .map_err(ServeError::Write)?;

        Ok(Response::status_only(StatusCode::Created))
    }

    async fn delete(&self, req: &Request) -> HandlerResult {
        self.require(&req.path, Operation::Delete).await?;

        let path = self.resolve(&req.path);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ServeError::NotFound(FILE_MISSING));
        }

        tokio::fs::remove_file(&path)
            .await
            .map_err(ServeError::Remove)?;

        Ok(Response::status_only(StatusCode::NoContent))
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
