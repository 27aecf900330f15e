use profiles::{Registry, config, net::telnet};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cfg = Arc::new(config::Config::from_env()?);
    let registry = Arc::new(Registry::new(cfg.clone()));
    tracing::info!(dir = %cfg.profiles_dir.display(), policy = ?registry.store.policy(), "profile storage");
    registry.store.init().await?;

    // Telnet server
    let tcp_addr: SocketAddr = cfg.tcp_addr.parse()?;
    let tcp_registry = registry.clone();

    tokio::select! {
        res = telnet::serve(tcp_addr, tcp_registry) => {
            if let Err(e) = res {
                tracing::error!(error=%e, "telnet server failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested");
        }
    }

    shutdown(&registry).await;
    Ok(())
}

/// Every mutation is already on disk; this only reports what is left behind.
async fn shutdown(registry: &Registry) {
    match registry.store.count().await {
        Ok(0) => tracing::info!("no profiles stored"),
        Ok(n) => tracing::warn!(count = n, "profiles left in storage at shutdown"),
        Err(e) => tracing::error!(error=%e, "could not count stored profiles"),
    }
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, prelude::*};

    color_eyre::install().map_err(|e| anyhow::anyhow!(e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,profiles=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}
