use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use super::jsonrpc::{JsonRpcMessage, JsonRpcResponse};
use super::router::{dispatch_request, handle_notification};
use crate::server::Server;

/// Handle one line of input. Returns the response to write, if any.
pub fn handle_line(server: &Arc<Server>, line: &str) -> Option<JsonRpcResponse> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match JsonRpcMessage::parse(line) {
        Ok(JsonRpcMessage::Request(request)) => Some(dispatch_request(server, &request)),
        Ok(JsonRpcMessage::Notification(notification)) => {
            handle_notification(server, &notification);
            None
        }
        Err(response) => {
            tracing::warn!("Rejected malformed message");
            Some(response)
        }
    }
}

/// Serve newline-delimited JSON-RPC until the reader reaches EOF.
///
/// Each request is handled to completion and its response flushed before the
/// next line is read.
pub async fn serve<R, W>(server: Arc<Server>, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await.context("failed to read from stdin")? {
        let Some(response) = handle_line(&server, &line) else {
            continue;
        };
        let mut encoded = serde_json::to_string(&response).context("failed to encode response")?;
        encoded.push('\n');
        writer
            .write_all(encoded.as_bytes())
            .await
            .context("failed to write to stdout")?;
        writer.flush().await.context("failed to flush stdout")?;
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

/// Why [`serve_until`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stopped {
    InputClosed,
    Shutdown,
}

/// Run [`serve`] until the input closes or `shutdown` resolves.
///
/// On `Shutdown` a read may still be pending on a blocking stdin thread, so
/// the caller has to exit the process rather than wait for the runtime.
pub async fn serve_until<R, W, F>(
    server: Arc<Server>,
    reader: R,
    writer: W,
    shutdown: F,
) -> Result<Stopped>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    F: Future<Output = ()>,
{
    tokio::select! {
        result = serve(server, reader, writer) => result.map(|()| Stopped::InputClosed),
        () = shutdown => Ok(Stopped::Shutdown),
    }
}
