use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::context::AppContext;
use crate::domain::message::{IncomingMessage, ReactionEvent};
use crate::domain::ticket::Ticket;
use crate::workflow::ticket::create_ticket_from_message;

pub const FAILURE_REPLY: &str = "❌ Failed to create the ticket.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    Ignored,
    ChannelUnavailable,
    MessageUnavailable,
    Created(Ticket),
    Failed,
}

/// Turns pushpin reactions into tickets. Every failure is logged and folded
/// into the returned outcome so the dispatcher keeps running.
#[derive(Clone)]
pub struct ReactionHandler {
    ctx: Arc<AppContext>,
}

impl ReactionHandler {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub async fn handle(&self, event: &ReactionEvent) -> HandlerOutcome {
        info!(
            emoji = %event.emoji,
            message_id = %event.message_id,
            user_id = %event.user_id,
            "reaction received"
        );

        if event.emoji != self.ctx.config.trigger_emoji {
            debug!(emoji = %event.emoji, "ignoring reaction");
            return HandlerOutcome::Ignored;
        }

        let mut channel = match self.ctx.chat.resolve_channel(&event.channel_id).await {
            Ok(channel) => channel,
            Err(err) => {
                warn!(channel_id = %event.channel_id, error = %err, "channel unavailable");
                return HandlerOutcome::ChannelUnavailable;
            }
        };
        if channel.guild_id.is_none() {
            channel.guild_id = event.guild_id.clone();
        }

        let message = match self
            .ctx
            .chat
            .fetch_message(&channel, &event.message_id)
            .await
        {
            Ok(message) => message,
            Err(err) => {
                warn!(message_id = %event.message_id, error = %err, "failed to fetch message");
                return HandlerOutcome::MessageUnavailable;
            }
        };
        info!(
            message_id = %message.id,
            author_id = %message.author_id,
            created_at = %message.created_at,
            preview = %message.preview(),
            "message fetched"
        );

        match create_ticket_from_message(&self.ctx, &message).await {
            Ok(ticket) => {
                self.reply(&message, &format!("✅ Ticket created: {}", ticket.url))
                    .await;
                HandlerOutcome::Created(ticket)
            }
            Err(err) => {
                error!(message_id = %message.id, error = %err, "ticket creation failed");
                self.reply(&message, FAILURE_REPLY).await;
                HandlerOutcome::Failed
            }
        }
    }

    async fn reply(&self, message: &IncomingMessage, content: &str) {
        if let Err(err) = self.ctx.chat.reply(message, content).await {
            warn!(message_id = %message.id, error = %err, "failed to post reply");
        }
    }
}
