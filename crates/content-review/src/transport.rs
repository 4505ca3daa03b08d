/// Serving loops for the two MCP transports: stdio for a single client launched by
/// the host, TCP for any number of concurrent clients.
use std::net::SocketAddr;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

use crate::server::ContentReviewServer;

/// Serve one client over stdin/stdout until it disconnects.
pub async fn serve_stdio(server: ContentReviewServer) -> anyhow::Result<()> {
    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!(error = %e, "MCP server error");
    })?;
    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}

/// Accept clients on `listener` forever, one task per connection.
///
/// A failed accept or a failed session is logged and the loop keeps going; only
/// the caller can stop it.
pub async fn serve_tcp(listener: TcpListener, server: ContentReviewServer) -> anyhow::Result<()> {
    info!(listen_addr = %listener.local_addr()?, "MCP server ready, serving on TCP");
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "failed to accept TCP connection");
                continue;
            }
        };
        tokio::spawn(serve_connection(server.clone(), stream, peer));
    }
}

async fn serve_connection(server: ContentReviewServer, stream: TcpStream, peer: SocketAddr) {
    info!(%peer, "MCP client connected");
    let service = match server.serve(stream).await {
        Ok(service) => service,
        Err(e) => {
            warn!(%peer, error = %e, "MCP session failed to initialize");
            return;
        }
    };
    match service.waiting().await {
        Ok(reason) => info!(%peer, ?reason, "MCP client disconnected"),
        Err(e) => warn!(%peer, error = %e, "MCP session ended with error"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use review_core::model::TermIndex;
    use review_core::review::Reviewer;
    use tokio::io::AsyncWriteExt;

    use super::*;

    #[tokio::test]
    async fn tcp_loop_survives_broken_clients() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = ContentReviewServer::new(Arc::new(Reviewer::new(Arc::new(TermIndex::empty()))));
        let serving = tokio::spawn(serve_tcp(listener, server));

        // Hang up before the handshake, then send garbage.
        drop(TcpStream::connect(addr).await.unwrap());
        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(b"not json-rpc\n").await.unwrap();
        drop(client);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!serving.is_finished(), "accept loop exited after a bad client");

        // Still accepting.
        TcpStream::connect(addr).await.unwrap();
        assert!(!serving.is_finished());
        serving.abort();
    }
}
