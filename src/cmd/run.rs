use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use crate::context::AppContext;
use crate::dispatch::{DispatchSummary, Dispatcher};
use crate::error::AppResult;
use crate::ingress::{IngressSummary, forward_events};
use crate::workflow::reaction::ReactionHandler;

const EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct RunCommandArgs {
    pub events: Option<PathBuf>,
}

pub async fn run(
    ctx: AppContext,
    args: RunCommandArgs,
) -> AppResult<(IngressSummary, DispatchSummary)> {
    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &args.events {
        Some(path) => {
            info!(path = %path.display(), "reading reaction events from file");
            Box::new(BufReader::new(File::open(path).await?))
        }
        None => {
            info!("reading reaction events from stdin");
            Box::new(BufReader::new(io::stdin()))
        }
    };

    let (sender, receiver) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let dispatcher = Dispatcher::new(ReactionHandler::new(Arc::new(ctx)));
    let dispatching = tokio::spawn(dispatcher.run(receiver));

    let ingress = forward_events(reader, sender).await;
    // The sender is dropped by now, so the dispatcher drains and stops.
    let dispatch = dispatching.await.map_err(std::io::Error::other)?;

    Ok((ingress?, dispatch))
}
