//! Throwaway loopback HTTP server for client tests.
//!
//! Answers each request with the canned `(status, body)` registered for its path and
//! records every request line so tests can count calls per endpoint.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

pub struct MockServer {
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// `routes` maps a path (without query, e.g. `/fred/series`) to `(status, body)`.
    /// Unknown paths get a 404.
    pub fn start(routes: &[(&str, u16, String)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let routes: HashMap<String, (u16, String)> = routes
            .iter()
            .map(|(p, s, b)| (p.to_string(), (*s, b.clone())))
            .collect();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &routes, &seen);
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{}/fred", port),
            hits,
        }
    }

    /// Request targets (path + query) in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    /// Number of requests whose path is exactly `path`.
    pub fn count(&self, path: &str) -> usize {
        self.hits()
            .iter()
            .filter(|h| h.split('?').next() == Some(path))
            .count()
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    hits: &Mutex<Vec<String>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let head = String::from_utf8_lossy(&buf);
    let target = head
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    hits.lock().unwrap().push(target.clone());

    let path = target.split('?').next().unwrap_or("");
    let (status, body) = routes
        .get(path)
        .cloned()
        .unwrap_or((404, r#"{"error_message":"not found"}"#.to_string()));
    let resp = format!(
        "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(resp.as_bytes());
    let _ = stream.flush();
}

/// The observations payload used across tests.
pub fn sample_series_response() -> serde_json::Value {
    serde_json::json!({
        "series_id": "GDP",
        "title": "Gross Domestic Product",
        "frequency": "Quarterly",
        "units": "Billions of Dollars",
        "observations": [
            {"date": "2023-01-01", "value": "25723.9"},
            {"date": "2023-04-01", "value": "26047.2"}
        ]
    })
}

/// A `series` metadata payload for GDP.
pub fn sample_info_response() -> serde_json::Value {
    serde_json::json!({
        "realtime_start": "2024-01-01",
        "realtime_end": "2024-01-01",
        "seriess": [{
            "id": "GDP",
            "title": "Gross Domestic Product",
            "frequency": "Quarterly",
            "frequency_short": "Q",
            "units": "Billions of Dollars",
            "units_short": "Bil. of $",
            "seasonal_adjustment": "Seasonally Adjusted Annual Rate",
            "popularity": 93
        }]
    })
}
