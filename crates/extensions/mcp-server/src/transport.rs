//! Newline-delimited JSON-RPC over a byte stream.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::protocol::{McpError, McpRequest, McpResponse, RequestId};
use crate::server::McpServer;

/// Transport errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serve requests read from `reader`, one JSON message per line, writing
/// responses to `writer` until end of input.
///
/// A line that is not valid UTF-8 is answered with a parse error and the
/// session continues.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> Result<(), TransportError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match decode(line) {
                    Ok(request) => server.handle(request).await,
                    Err(response) => Some(response),
                }
            }
            Err(e) => {
                warn!(error = %e, "Message is not valid UTF-8");
                Some(McpResponse::error(None, McpError::parse_error()))
            }
        };
        if let Some(response) = response {
            write_response(&mut writer, &response).await?;
        }
    }

    info!("Input closed, stopping");
    Ok(())
}

async fn write_response<W>(writer: &mut W, response: &McpResponse) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Serve on the process's stdin and stdout.
pub async fn serve_stdio(server: &McpServer) -> Result<(), TransportError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(server, stdin, stdout).await
}

/// Parse one line. Invalid JSON is a parse error with a null id; valid JSON
/// that is not a request keeps its id when one can be read.
fn decode(line: &str) -> Result<McpRequest, McpResponse> {
    let value: serde_json::Value = serde_json::from_str(line).map_err(|e| {
        warn!(error = %e, "Unparseable message");
        McpResponse::error(None, McpError::parse_error())
    })?;

    let id = value
        .get("id")
        .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok());
    serde_json::from_value(value).map_err(|e| {
        debug!(error = %e, "Malformed request");
        McpResponse::error(id, McpError::invalid_request())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_garbage() {
        let response = decode("{not json").unwrap_err();
        assert!(response.id.is_none());
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[test]
    fn test_decode_missing_method_keeps_id() {
        let response = decode(r#"{"jsonrpc":"2.0","id":3}"#).unwrap_err();
        assert_eq!(response.id, Some(RequestId::Number(3)));
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[test]
    fn test_decode_request() {
        let request = decode(r#"{"jsonrpc":"2.0","id":"a","method":"ping"}"#).unwrap();
        assert_eq!(request.method, "ping");
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_gets_parse_error() {
        use onesignal_core::{ResourceRegistry, ToolRegistry};
        use std::sync::Arc;

        let server = McpServer::new(
            crate::ServerInfo::new("onesignal-mcp", "test"),
            Arc::new(ToolRegistry::new()),
            Arc::new(ResourceRegistry::new()),
        );
        let input: &[u8] = b"\xff\xfe garbage\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}";
        let mut output = Vec::new();
        serve(&server, input, &mut output).await.unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0]["id"].is_null());
        assert_eq!(lines[0]["error"]["code"], -32700);
        assert_eq!(lines[1]["id"], 1);
    }

    #[test]
    fn test_transport_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let err: TransportError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
