use anyhow::Context;
use sift_dns_infrastructure::dns::server::{DnsServer, Listeners};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

pub async fn bind_dns_listeners(bind_addr: &str) -> anyhow::Result<Listeners> {
    let socket_addr = SocketAddr::from_str(bind_addr)
        .with_context(|| format!("Invalid listen address: {}", bind_addr))?;

    info!(bind_address = %socket_addr, "Starting DNS server");

    Listeners::bind(socket_addr)
        .await
        .context("Failed to open DNS listeners")
}

pub async fn start_dns_server(server: Arc<DnsServer>, listeners: Listeners) -> anyhow::Result<()> {
    server.run(listeners).await?;
    Ok(())
}
