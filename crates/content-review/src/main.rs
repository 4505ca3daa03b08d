mod config;
mod error;
mod server;
mod transport;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use review_core::loader;
use review_core::review::Reviewer;
use review_core::suggestion::{FirstChooser, ThreadChooser};
use server::ContentReviewServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting content-review MCP server");

    let config = Config::from_env()?;
    info!(
        terms_path = %config.terms_path.display(),
        substitution = config.substitution.as_str(),
        deterministic = config.deterministic,
        "configuration loaded"
    );

    // Loaded once for the life of the process.
    let (index, load_error) = loader::load_or_empty(&config.terms_path);
    if load_error.is_some() {
        warn!("serving with an empty term index, no content will be flagged");
    }

    let reviewer = Reviewer::new(Arc::new(index))
        .with_mode(config.substitution)
        .with_load_error(load_error);
    let reviewer = if config.deterministic {
        reviewer.with_chooser(Arc::new(FirstChooser))
    } else {
        reviewer.with_chooser(Arc::new(ThreadChooser))
    };

    let server = ContentReviewServer::new(Arc::new(reviewer));

    match config.tcp_listen_addr.as_deref() {
        Some(addr) => {
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind MCP_TCP_LISTEN_ADDR {addr}"))?;
            transport::serve_tcp(listener, server).await
        }
        None => transport::serve_stdio(server).await,
    }
}
