//! End-to-end relay server behavior over a real loopback socket.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::thread;

use lab_core::enums::Severity;
use lab_preview::{PreviewError, RelayServer};

fn http(addr: std::net::SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.write_all(raw.as_bytes()).expect("write");
    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read");
    response
}

fn post_relay(addr: std::net::SocketAddr, body: &str) -> String {
    http(
        addr,
        &format!(
            "POST /relay HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
    )
}

#[test]
fn serves_page_and_relays_messages_in_order() {
    let server = RelayServer::bind(0).expect("bind");
    let addr = server.addr();
    let shutdown = server.shutdown_handle();
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        server.run(
            "codelab preview",
            || Ok("<p>composed</p>".to_string()),
            move |entry| {
                let _ = tx.send(entry);
            },
        )
    });

    let page = http(addr, "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    assert!(page.starts_with("HTTP/1.1 200"));
    assert!(page.contains("srcdoc=\"&lt;p&gt;composed&lt;/p&gt;\""));

    let first = post_relay(
        addr,
        r#"{"channel":"codelab-console","level":"info","message":"1"}"#,
    );
    assert!(first.starts_with("HTTP/1.1 204"));
    let second = post_relay(
        addr,
        r#"{"channel":"codelab-console","level":"error","message":"Error: boom (Line 2)"}"#,
    );
    assert!(second.starts_with("HTTP/1.1 204"));

    let rejected = post_relay(addr, r#"{"channel":"elsewhere","level":"info","message":"x"}"#);
    assert!(rejected.starts_with("HTTP/1.1 400"));

    let missing = http(addr, "GET /nope HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    assert!(missing.starts_with("HTTP/1.1 404"));

    shutdown.store(true, Ordering::Relaxed);
    handle.join().expect("join").expect("server run");

    let entries: Vec<_> = rx.try_iter().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].severity, Severity::Info);
    assert_eq!(entries[0].message, "1");
    assert_eq!(entries[1].severity, Severity::Error);
    assert_eq!(entries[1].message, "Error: boom (Line 2)");
}

#[test]
fn compose_failure_is_reported_to_sink() {
    let server = RelayServer::bind(0).expect("bind");
    let addr = server.addr();
    let shutdown = server.shutdown_handle();
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        server.run(
            "codelab preview",
            || Err(PreviewError::Compose("project file vanished".into())),
            move |entry| {
                let _ = tx.send(entry);
            },
        )
    });

    let page = http(addr, "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    assert!(page.starts_with("HTTP/1.1 500"));

    shutdown.store(true, Ordering::Relaxed);
    handle.join().expect("join").expect("server run");

    let entries: Vec<_> = rx.try_iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Error);
    assert!(entries[0].message.contains("project file vanished"));
}

#[test]
fn oversized_message_leaves_a_warning() {
    let server = RelayServer::bind(0).expect("bind");
    let addr = server.addr();
    let shutdown = server.shutdown_handle();
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        server.run(
            "codelab preview",
            || Ok(String::new()),
            move |entry| {
                let _ = tx.send(entry);
            },
        )
    });

    let huge = "x".repeat(lab_preview::relay::MAX_RELAY_BYTES);
    let body = format!(r#"{{"channel":"codelab-console","level":"info","message":"{huge}"}}"#);
    let response = post_relay(addr, &body);
    assert!(response.starts_with("HTTP/1.1 413"));

    shutdown.store(true, Ordering::Relaxed);
    handle.join().expect("join").expect("server run");

    let entries: Vec<_> = rx.try_iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Warn);
    assert!(entries[0].message.starts_with("Console message dropped"));
}
