//! Network infrastructure — implements `NetworkProbe` using `spawn_blocking`.

use anyhow::Result;

use crate::application::ports::NetworkProbe;

/// Production implementation that performs real network checks.
pub struct TokioNetworkProbe;

impl NetworkProbe for TokioNetworkProbe {
    async fn check_tcp_connectivity(&self, host: &str, port: u16) -> Result<bool> {
        let addr = format!("{host}:{port}");
        let result = tokio::task::spawn_blocking(move || {
            use std::net::ToSocketAddrs;
            use std::time::Duration;
            let Ok(mut addrs) = addr.to_socket_addrs() else {
                return Ok::<bool, anyhow::Error>(false);
            };
            let Some(resolved) = addrs.next() else {
                return Ok(false);
            };
            Ok(std::net::TcpStream::connect_timeout(&resolved, Duration::from_secs(3)).is_ok())
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))??;
        Ok(result)
    }

    async fn check_dns_resolution(&self, hostname: &str) -> Result<bool> {
        let addr = format!("{hostname}:22");
        let result = tokio::task::spawn_blocking(move || {
            use std::net::ToSocketAddrs;
            Ok::<bool, anyhow::Error>(addr.to_socket_addrs().is_ok())
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))??;
        Ok(result)
    }
}
