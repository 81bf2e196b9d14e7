//! TCP boundary (C8).
//!
//! A synchronous, one-shot `std::net::TcpListener` loop mirroring
//! `original_source/algo_server.py`: bind once, accept one client at a
//! time, reject any peer whose address doesn't match the configured
//! client address, read one JSON request, reply with the plain
//! comma-joined command string, close. The blocking-socket shape (no
//! tokio) follows the teacher's own precedent in `step9::find_free_port`,
//! which reaches for `std::net::TcpListener` for a one-shot synchronous
//! operation rather than pulling in the async runtime for it.

use crate::config::PlannerConfig;
use crate::plan;
use crate::request::RequestEnvelope;
use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::net::{IpAddr, TcpListener, TcpStream};
use tracing::{info, warn};

/// Runs the planner server: binds `port`, then serves connections in a
/// loop, one at a time, until a peer fails the address check (matching
/// `algo_server.py`'s `break` on a rejected peer) or the process is
/// killed.
///
/// `expected_client` mirrors the hard-coded `CLIENT_ADDR` check in the
/// original script; `None` disables the check (useful for local testing
/// and the loopback integration test).
pub fn run_server(port: u16, expected_client: Option<IpAddr>, config: PlannerConfig) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .with_context(|| format!("failed to bind TCP listener on port {port}"))?;
    info!(port, "planner server listening");

    loop {
        let (stream, addr) = listener.accept().context("failed to accept connection")?;

        if let Some(expected) = expected_client {
            if addr.ip() != expected {
                warn!(peer = %addr.ip(), expected = %expected, "rejecting connection from unexpected peer");
                drop(stream);
                break;
            }
        }

        info!(peer = %addr, "accepted connection");
        if let Err(err) = handle_connection(stream, &config) {
            warn!(error = %err, "error handling connection");
        }
    }

    Ok(())
}

fn handle_connection(mut stream: TcpStream, config: &PlannerConfig) -> Result<()> {
    let mut buf = vec![0u8; 1024 * 64];
    let n = stream.read(&mut buf).context("failed to read request")?;
    let body = std::str::from_utf8(&buf[..n]).context("request was not valid UTF-8")?;

    let envelope: RequestEnvelope =
        serde_json::from_str(body).context("failed to parse request JSON")?;

    let outcome = plan::plan(&envelope.data, config.clone()).context("planning failed")?;

    let commands_string = outcome.commands.join(",");
    stream
        .write_all(commands_string.as_bytes())
        .context("failed to write response")?;
    Ok(())
}
