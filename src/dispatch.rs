use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info};

use crate::domain::message::ReactionEvent;
use crate::workflow::reaction::{HandlerOutcome, ReactionHandler};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    pub received: usize,
    pub ignored: usize,
    pub created: usize,
    pub unavailable: usize,
    pub failed: usize,
    pub aborted: usize,
}

impl DispatchSummary {
    fn record(&mut self, joined: Result<HandlerOutcome, JoinError>) {
        match joined {
            Ok(HandlerOutcome::Ignored) => self.ignored += 1,
            Ok(HandlerOutcome::Created(_)) => self.created += 1,
            Ok(HandlerOutcome::ChannelUnavailable | HandlerOutcome::MessageUnavailable) => {
                self.unavailable += 1
            }
            Ok(HandlerOutcome::Failed) => self.failed += 1,
            Err(err) => {
                error!(error = %err, "reaction task aborted");
                self.aborted += 1;
            }
        }
    }
}

/// Receives reaction events and handles each one on its own task.
pub struct Dispatcher {
    handler: ReactionHandler,
}

impl Dispatcher {
    pub fn new(handler: ReactionHandler) -> Self {
        Self { handler }
    }

    /// Runs until the sending side closes, then waits for in-flight events.
    pub async fn run(self, mut events: mpsc::Receiver<ReactionEvent>) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                received = events.recv() => match received {
                    Some(event) => {
                        summary.received += 1;
                        let handler = self.handler.clone();
                        tasks.spawn(async move { handler.handle(&event).await });
                    }
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => summary.record(joined),
            }
        }

        while let Some(joined) = tasks.join_next().await {
            summary.record(joined);
        }

        info!(
            received = summary.received,
            created = summary.created,
            failed = summary.failed,
            "dispatcher stopped"
        );
        summary
    }
}
