use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::dispatcher::Dispatcher;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Counters for one serving session.
pub struct ServeStats {
    pub requests: u64,
    pub errors: u64,
    pub skipped: u64,
}

/// Answers every non-blank input line with one JSON line, flushing after each.
///
/// Returns at end of input. Only I/O errors on the streams themselves are propagated.
pub async fn serve<R, W>(
    dispatcher: &Dispatcher,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<ServeStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = ServeStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            stats.skipped += 1;
            continue;
        }

        let response = dispatcher.handle_line(line).await;
        stats.requests += 1;
        if response.is_error() {
            stats.errors += 1;
        }

        let mut frame = response.to_line();
        frame.push('\n');
        writer.write_all(frame.as_bytes()).await?;
        writer.flush().await?;
    }

    debug!(
        requests = stats.requests,
        errors = stats.errors,
        skipped = stats.skipped,
        "Input closed"
    );

    Ok(stats)
}
