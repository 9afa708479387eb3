//! Contact Notification Service
//!
//! Collaborator contract for forwarding contact-form messages to the
//! staff (mail, chat webhook, ...). The default implementation writes a
//! structured log line, which is where the ops tooling picks it up.

use crate::domain::entities::ContactMessage;
use crate::error::ContentResult;

/// Notification sink for contact messages
#[trait_variant::make(ContactNotifier: Send)]
pub trait LocalContactNotifier {
    async fn notify(&self, message: &ContactMessage) -> ContentResult<()>;
}

/// Notifier that emits a structured log record
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl ContactNotifier for TracingNotifier {
    async fn notify(&self, message: &ContactMessage) -> ContentResult<()> {
        tracing::info!(
            message_id = %message.message_id,
            sender = %message.sender_email,
            "Contact message received"
        );
        Ok(())
    }
}
