use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::core::config::AppConfig;

/// Bind one TCP listener with the server's socket options
fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(Duration::from_secs(60))
            .with_interval(Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;

    TcpListener::from_std(socket.into())
}

/// Bind the configured port, or the first free one in the probe range when none is set
pub fn bind_listener(config: &AppConfig) -> anyhow::Result<(TcpListener, SocketAddr)> {
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address: {}", config.host))?;

    if let Some(port) = config.port {
        let addr = SocketAddr::new(ip, port);
        let listener = bind(addr).with_context(|| format!("Failed to bind {}", addr))?;
        return Ok((listener, addr));
    }

    let end = config
        .port_probe_start
        .saturating_add(config.port_probe_attempts);

    for port in config.port_probe_start..end {
        let addr = SocketAddr::new(ip, port);
        match bind(addr) {
            Ok(listener) => return Ok((listener, addr)),
            Err(e) => tracing::debug!("Port {} unavailable: {}", port, e),
        }
    }

    anyhow::bail!(
        "No free port in {}..{} on {}",
        config.port_probe_start,
        end,
        config.host
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(port: Option<u16>, probe_start: u16) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port,
            port_probe_start: probe_start,
            port_probe_attempts: 20,
        }
    }

    #[tokio::test]
    async fn test_probe_skips_busy_port() {
        let busy = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let busy_port = busy.local_addr().unwrap().port();

        let (_listener, addr) = bind_listener(&config(None, busy_port)).unwrap();
        assert_ne!(addr.port(), busy_port);
        assert!(addr.port() > busy_port);
    }

    #[tokio::test]
    async fn test_explicit_busy_port_fails() {
        let busy = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let busy_port = busy.local_addr().unwrap().port();

        assert!(bind_listener(&config(Some(busy_port), 5000)).is_err());
    }

    #[tokio::test]
    async fn test_invalid_host_is_rejected() {
        let mut cfg = config(Some(0), 5000);
        cfg.host = "not-an-ip".to_string();
        assert!(bind_listener(&cfg).is_err());
    }
}
