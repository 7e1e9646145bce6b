//! Minimal status endpoint.
//!
//! One route, `GET /api/status`, answering `{"status":"ok"}`. Nothing in
//! the session flow talks to it; it exists so deployments have a health
//! check to point at.

use std::io::{Read, Write};
use std::net::TcpListener;

use tracing::{debug, info};

pub fn run(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr)?;
    info!("status endpoint listening on {addr}");

    for stream in listener.incoming() {
        let mut stream = match stream {
            Ok(s) => s,
            Err(err) => {
                debug!("dropped connection: {err}");
                continue;
            }
        };
        let mut buf = [0u8; 1024];
        let n = stream.read(&mut buf).unwrap_or(0);
        let request = String::from_utf8_lossy(&buf[..n]);

        let (status_line, body) = if request.starts_with("GET /api/status") {
            ("HTTP/1.1 200 OK", r#"{"status":"ok"}"#)
        } else {
            ("HTTP/1.1 404 Not Found", r#"{"error":"not found"}"#)
        };
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        );
        if let Err(err) = stream.write_all(response.as_bytes()) {
            debug!("failed to write response: {err}");
        }
    }
    Ok(())
}
