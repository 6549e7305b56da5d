//! Log-only notification dispatcher.
//!
//! Stands in for the real email/SMS transport; every alert lands in
//! the structured log instead of a member inbox.

use tracing::info;
use uuid::Uuid;

use fundra_core::store::{NotificationDispatcher, NotifyError};

/// Dispatcher that writes every notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDispatcher;

impl NotificationDispatcher for LogDispatcher {
    fn send_validation_alert(&self, member_id: Uuid, message: &str) -> Result<(), NotifyError> {
        info!(member_id = %member_id, message, "validation alert");
        Ok(())
    }

    fn send_eligibility_notification(
        &self,
        member_id: Uuid,
        message: &str,
    ) -> Result<(), NotifyError> {
        info!(member_id = %member_id, message, "eligibility notification");
        Ok(())
    }

    fn send_interest_notification(
        &self,
        member_id: Uuid,
        message: &str,
    ) -> Result<(), NotifyError> {
        info!(member_id = %member_id, message, "interest notification");
        Ok(())
    }

    fn send_transaction_alert(&self, member_id: Uuid, message: &str) -> Result<(), NotifyError> {
        info!(member_id = %member_id, message, "transaction alert");
        Ok(())
    }
}
