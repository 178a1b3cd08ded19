//! Stdin/stdout JSON bridge for the host channel.
//!
//! Reads newline-delimited JSON `RequestEnvelope` messages, answers each with
//! exactly one `ResponseEnvelope` line, in request order.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{Result, ZephyrError};

use super::contract::{CommandName, HostRequest, RequestEnvelope, ResponseEnvelope};
use super::handler::HostHandler;

/// Request id used when a line cannot be parsed at all.
pub const PARSE_ERROR_ID: &str = "parse-error";

/// Run the bridge over stdin/stdout until stdin closes or `host.shutdown`
/// is received.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be written.
pub async fn run_stdio_bridge(handler: HostHandler) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_bridge(handler, stdin, stdout).await
}

/// Run the bridge over any line reader and writer.
///
/// Tool calls execute on tokio's blocking pool so a slow collaborator (the
/// HTTP train lookup) does not stall the reader.
///
/// # Errors
///
/// Returns an error if `reader` fails or `writer` cannot be written.
pub async fn run_bridge<R, W>(handler: HostHandler, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ZephyrError::Host(format!("failed to read request line: {e}")))?
    {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let envelope: RequestEnvelope = match serde_json::from_str(trimmed) {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse request envelope");
                let response = ResponseEnvelope::error(
                    PARSE_ERROR_ID,
                    format!("failed to parse request envelope: {e}"),
                );
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        let request = match envelope.validate() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, request_id = %envelope.request_id, "invalid request");
                let response = ResponseEnvelope::error(envelope.request_id, e.to_string());
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        let is_shutdown = request == HostRequest::Command(CommandName::HostShutdown);
        let response = dispatch(&handler, envelope.request_id, request).await;
        write_response(&mut writer, &response).await?;

        if is_shutdown {
            tracing::info!("host.shutdown received; stopping bridge");
            return Ok(());
        }
    }

    tracing::info!("input closed (EOF); stopping bridge");
    Ok(())
}

async fn dispatch(
    handler: &HostHandler,
    request_id: String,
    request: HostRequest,
) -> ResponseEnvelope {
    match request {
        call @ HostRequest::ToolCall { .. } => {
            let worker = handler.clone();
            let id = request_id.clone();
            match tokio::task::spawn_blocking(move || worker.handle(&id, call)).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(error = %e, "tool worker failed");
                    ResponseEnvelope::error(request_id, format!("tool worker failed: {e}"))
                }
            }
        }
        command => handler.handle(&request_id, command),
    }
}

/// Write a single JSON line and flush.
async fn write_response<W>(writer: &mut W, response: &ResponseEnvelope) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_string(response)
        .map_err(|e| ZephyrError::Host(format!("failed to serialize response: {e}")))?;
    json.push('\n');
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| ZephyrError::Host(format!("failed to write response: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| ZephyrError::Host(format!("failed to flush response: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::assistant::Assistant;
    use crate::config::ZephyrConfig;

    async fn run_lines(input: &str) -> Vec<ResponseEnvelope> {
        let assistant = Assistant::from_config(ZephyrConfig::default()).unwrap();
        let mut out = Vec::new();
        run_bridge(HostHandler::new(&assistant), input.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn answers_each_line_in_order() {
        let input = concat!(
            r#"{"v":1,"request_id":"a","command":"host.ping"}"#,
            "\n\n",
            r#"{"v":1,"request_id":"b","tool":"get_contact_info_by_id","args":{"contact_id":"004"}}"#,
            "\n",
        );
        let responses = run_lines(input).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].request_id, "a");
        assert_eq!(responses[1].request_id, "b");
        assert!(responses[1].payload["content"].as_str().unwrap().contains("gigi"));
    }

    #[tokio::test]
    async fn garbage_gets_parse_error_and_bridge_continues() {
        let input = "not json\n{\"v\":1,\"request_id\":\"c\",\"command\":\"host.ping\"}\n";
        let responses = run_lines(input).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].request_id, PARSE_ERROR_ID);
        assert!(!responses[0].ok);
        assert!(responses[1].ok);
    }

    #[tokio::test]
    async fn invalid_envelope_keeps_request_id() {
        let input = "{\"v\":9,\"request_id\":\"d\",\"command\":\"host.ping\"}\n";
        let responses = run_lines(input).await;
        assert_eq!(responses[0].request_id, "d");
        assert!(responses[0].error.as_deref().unwrap().contains("UnsupportedVersion"));
    }

    #[tokio::test]
    async fn shutdown_stops_reading() {
        let input = concat!(
            r#"{"v":1,"request_id":"e","command":"host.shutdown"}"#,
            "\n",
            r#"{"v":1,"request_id":"f","command":"host.ping"}"#,
            "\n",
        );
        let responses = run_lines(input).await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].payload["shutting_down"], true);
    }

    #[tokio::test]
    async fn empty_input_is_clean_exit() {
        assert!(run_lines("").await.is_empty());
    }
}
