//! Newline-delimited JSON reaction events, one object per line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::message::ReactionEvent;
use crate::error::AppResult;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngressSummary {
    pub forwarded: usize,
    pub malformed: usize,
}

pub fn parse_event_line(line: &str) -> Option<Result<ReactionEvent, serde_json::Error>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed))
}

pub async fn forward_events<R>(
    reader: R,
    sender: mpsc::Sender<ReactionEvent>,
) -> AppResult<IngressSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = IngressSummary::default();
    let mut reader = reader;
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_number += 1;
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(err) => {
                warn!(line = line_number, error = %err, "skipping non UTF-8 reaction event");
                summary.malformed += 1;
                continue;
            }
        };
        let event = match parse_event_line(line) {
            None => continue,
            Some(Ok(event)) => event,
            Some(Err(err)) => {
                warn!(line = line_number, error = %err, "skipping malformed reaction event");
                summary.malformed += 1;
                continue;
            }
        };
        if sender.send(event).await.is_err() {
            debug!("dispatcher closed, stopping ingress");
            break;
        }
        summary.forwarded += 1;
    }

    Ok(summary)
}
