//! Local relay server.
//!
//! Serves the host page on `GET /` (recomposing the document on every
//! request, so a reload is a rerun that discards the old sandbox) and
//! accepts relay messages on `POST /relay`. Relay requests are answered with
//! `204` and an empty body; nothing flows back into the sandbox. Bodies over
//! the relay limit get `413` and leave a warning in the sink.
//!
//! `tiny_http::Server::recv_timeout` blocks, so callers in async code run
//! [`RelayServer::run`] inside `spawn_blocking`.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use lab_core::entities::LogEntry;
use lab_core::enums::Severity;

use crate::error::PreviewError;
use crate::host_page::{self, RELAY_PATH};
use crate::relay::{MAX_RELAY_BYTES, RelayMessage};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Where a request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Page,
    Relay,
    NotFound,
}

/// Map a method and URL to a [`Route`]. Query strings are ignored.
#[must_use]
pub fn route(method: &tiny_http::Method, url: &str) -> Route {
    let path = url.split('?').next().unwrap_or(url);
    match (method, path) {
        (tiny_http::Method::Get, "/" | "/index.html") => Route::Page,
        (tiny_http::Method::Post, p) if p == RELAY_PATH => Route::Relay,
        _ => Route::NotFound,
    }
}

/// Blocking HTTP server hosting one preview.
pub struct RelayServer {
    server: tiny_http::Server,
    addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
}

impl RelayServer {
    /// Bind to `127.0.0.1:<port>`; port `0` picks a free port.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Bind`] if the socket cannot be bound.
    pub fn bind(port: u16) -> Result<Self, PreviewError> {
        let server = tiny_http::Server::http(("127.0.0.1", port))
            .map_err(|e| PreviewError::Bind(e.to_string()))?;
        let addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| PreviewError::Bind("server has no IP address".into()))?;
        Ok(Self {
            server,
            addr,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Flag that stops [`RelayServer::run`] within one poll interval.
    #[must_use]
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Serve until the shutdown flag is set.
    ///
    /// `source` produces the composed document for each page load; `sink`
    /// receives every accepted relay message, plus an error entry when
    /// composition fails.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Io`] if receiving from the socket fails.
    pub fn run<S, K>(&self, title: &str, mut source: S, mut sink: K) -> Result<(), PreviewError>
    where
        S: FnMut() -> Result<String, PreviewError>,
        K: FnMut(LogEntry),
    {
        tracing::info!(url = %self.url(), "relay server listening");

        while !self.shutdown.load(Ordering::Relaxed) {
            let Some(mut request) = self.server.recv_timeout(POLL_INTERVAL)? else {
                continue;
            };

            let outcome = match route(request.method(), request.url()) {
                Route::Page => match source() {
                    Ok(document) => {
                        let page = host_page::render(&document, title);
                        request.respond(html_response(page, 200))
                    }
                    Err(error) => {
                        sink(LogEntry::new(Severity::Error, error.to_string()));
                        request.respond(html_response(
                            format!("<pre>{}</pre>", crate::escape::escape_html(&error.to_string())),
                            500,
                        ))
                    }
                },
                Route::Relay => {
                    let status: u16 = match read_relay(&mut request) {
                        Ok(message) => {
                            sink(message.into_entry(Utc::now()));
                            204
                        }
                        Err(PreviewError::TooLarge(_)) => {
                            sink(LogEntry::new(
                                Severity::Warn,
                                format!(
                                    "Console message dropped: larger than {MAX_RELAY_BYTES} bytes"
                                ),
                            ));
                            413
                        }
                        Err(error) => {
                            tracing::debug!(%error, "rejected relay request");
                            400
                        }
                    };
                    request.respond(tiny_http::Response::empty(status))
                }
                Route::NotFound => request.respond(tiny_http::Response::empty(404_u16)),
            };

            if let Err(error) = outcome {
                tracing::debug!(%error, "failed to write response");
            }
        }

        tracing::info!("relay server stopped");
        Ok(())
    }
}

fn read_relay(request: &mut tiny_http::Request) -> Result<RelayMessage, PreviewError> {
    let reader = request.as_reader();
    let mut body = Vec::new();
    (&mut *reader)
        .take(MAX_RELAY_BYTES as u64 + 1)
        .read_to_end(&mut body)?;
    // Drain the rest so the response is not cut off by a reset.
    std::io::copy(reader, &mut std::io::sink())?;
    RelayMessage::parse(&body)
}

fn html_response(body: String, status: u16) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(body).with_status_code(status);
    match tiny_http::Header::from_bytes("Content-Type", "text/html; charset=utf-8") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
