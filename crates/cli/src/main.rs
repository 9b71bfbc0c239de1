//! # sift-dns
//!
//! Local DNS proxy: races encrypted upstreams, caches answers and sinkholes
//! blocked names.

mod bootstrap;
mod di;
mod server;

use anyhow::Context;
use clap::Parser;
use di::DnsServices;
use sift_dns_domain::CliOverrides;
use sift_dns_jobs::JobRunner;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "sift-dns")]
#[command(version)]
#[command(about = "Local DNS proxy with upstream racing, caching and blocking")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(
        cli.config.as_deref(),
        CliOverrides {
            bind_address: cli.bind,
            dns_port: cli.port,
            log_level: cli.log_level,
        },
    )?;

    bootstrap::init_logging(&config);
    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        dns_port = config.server.dns_port,
        bind = %config.server.bind_address,
        upstreams = config.dns.upstream_servers.len(),
        "Configuration loaded"
    );

    let shutdown = CancellationToken::new();
    let services = DnsServices::new(&config, shutdown.clone())?;

    if let Some(sync) = &services.blocklist_sync {
        sync.load_all().await;
    }

    let listen_addr = config.server.listen_addr();
    let listeners = server::bind_dns_listeners(&listen_addr).await?;

    if config.server.manage_system_dns {
        let local = listeners.local_addr()?;
        services
            .system_dns
            .remember()
            .context("Failed to save system DNS configuration")?;
        services
            .system_dns
            .redirect_to(resolver_ip(local.ip()))
            .context("Failed to redirect system DNS")?;
    }

    let mut jobs = JobRunner::new().with_stats_report(services.stats_report);
    if let Some(sync) = services.blocklist_sync {
        jobs = jobs.with_blocklist_sync(sync);
    }
    jobs.start().await;

    let server_task = tokio::spawn(server::start_dns_server(services.server, listeners));
    info!("✅ Server ready! Press Ctrl+C to stop");

    tokio::select! {
        result = server_task => match result {
            Ok(Ok(())) => info!("DNS server stopped"),
            Ok(Err(e)) => error!(error = %e, "DNS server failed"),
            Err(e) => error!(error = %e, "DNS server task aborted"),
        },
        _ = shutdown_signal() => info!("Shutdown signal received"),
    }

    shutdown.cancel();
    services.fatal.restore_system_dns();
    info!("Shutdown complete");

    Ok(())
}

/// A wildcard bind is reachable on loopback; anything else is used as is.
fn resolver_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V4(v4) if v4.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(v6) if v6.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        other => other,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_bind_redirects_to_loopback() {
        assert_eq!(
            resolver_ip(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        );
        assert_eq!(
            resolver_ip(IpAddr::V6(Ipv6Addr::UNSPECIFIED)),
            IpAddr::V6(Ipv6Addr::LOCALHOST)
        );
        assert_eq!(
            resolver_ip("192.168.1.2".parse().unwrap()),
            "192.168.1.2".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_cli_flags_parse() {
        let cli = Cli::parse_from([
            "sift-dns",
            "--config",
            "/etc/sift-dns.toml",
            "--bind",
            "0.0.0.0",
            "--port",
            "5353",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.config.as_deref(), Some("/etc/sift-dns.toml"));
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(5353));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
