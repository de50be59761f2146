//! Minimal in-process HTTP stub for exercising the fetch path in tests.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Serves canned responses from a background thread. The first route
/// whose marker appears in the request line wins; unmatched requests
/// get a 404.
pub struct StubServer {
    base_url: String,
}

impl StubServer {
    pub fn start(routes: Vec<(&'static str, u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server addr");

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut buf = [0u8; 8192];
                let n = stream.read(&mut buf).unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let request_line = request.lines().next().unwrap_or("");

                let (status, body) = routes
                    .iter()
                    .find(|(marker, _, _)| request_line.contains(marker))
                    .map(|(_, status, body)| (*status, *body))
                    .unwrap_or((404, "{}"));

                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self {
            base_url: format!("http://{addr}"),
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }
}
