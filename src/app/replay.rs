//! Replay of recorded requests through the hook pipeline
//!
//! Each input line is one request:
//!
//! ```text
//! {"events":[{"collection":"purchases","payload":{"item":"book"}},{"collection":"views","payload":{"page":"home"}}]}
//! ```
//!
//! A missing collection reads as empty and a missing or null payload as
//! absent, so malformed events can be replayed too.

use crate::hooks::{record_event, EventHooks};
use crate::request::{handle_request, RequestContext, RequestHook};
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Deserialize)]
pub struct RecordedRequest {
    #[serde(default)]
    pub events: Vec<RecordedEvent>,
}

#[derive(Debug, Deserialize)]
pub struct RecordedEvent {
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub requests: usize,
    pub events_recorded: usize,
    pub lines_skipped: usize,
}

/// Run every recorded request through `handle_request`
///
/// Without hooks the requests are still handled, but nothing is recorded.
/// Lines that are not valid requests are logged and skipped.
pub async fn replay<R>(reader: R, hooks: Option<&EventHooks>) -> std::io::Result<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
{
    let pipeline: Vec<&dyn RequestHook> = match hooks {
        Some(hooks) => vec![hooks],
        None => Vec::new(),
    };
    let mut summary = ReplaySummary::default();
    let mut lines = reader.lines();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: RecordedRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Skipping line {}: not a valid request: {}", line_number, e);
                summary.lines_skipped += 1;
                continue;
            }
        };

        let mut ctx = RequestContext::new();
        let recorded = handle_request(&pipeline, &mut ctx, |ctx| {
            request
                .events
                .into_iter()
                .map(|event| record_event(ctx, event.collection, event.payload))
                .filter(|recorded| *recorded)
                .count()
        });

        summary.requests += 1;
        summary.events_recorded += recorded;
    }

    Ok(summary)
}
