use std::io::{self, ErrorKind};
use std::net::TcpListener;

use tracing::{info, warn};

/// Binds `host:port`, moving up one port each time the address is already
/// taken. Gives up after `attempts` ports; any other bind error is returned
/// straight away.
pub fn bind_listener(host: &str, port: u16, attempts: u16) -> io::Result<TcpListener> {
    let mut candidate = port;

    for attempt in 1..=attempts.max(1) {
        match TcpListener::bind((host, candidate)) {
            Ok(listener) => {
                info!(port = candidate, attempt, "Listener bound");
                return Ok(listener);
            }
            Err(e) if e.kind() == ErrorKind::AddrInUse => {
                let Some(next) = candidate.checked_add(1) else {
                    break;
                };
                warn!(port = candidate, next, "Port in use, trying the next one");
                candidate = next;
            }
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::new(
        ErrorKind::AddrInUse,
        format!("no free port on {} among {} starting at {}", host, attempts, port),
    ))
}
