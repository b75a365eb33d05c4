//! Broadcast and unicast delivery.
//!
//! Every write is a non-blocking enqueue on the recipient's outbox. A full
//! or closed outbox is a failed write; there are no retries.

use crate::error::DeliveryError;
use crate::state::{ConnId, Hub};
use asyncchat_proto::stamped;
use chrono::Local;
use std::sync::Arc;
use tracing::debug;

impl Hub {
    /// Send a timestamped line to every connection not in `exclude`.
    ///
    /// Recipients whose write fails are disconnected with reason
    /// "broken pipe" once the roster lock is released.
    pub fn broadcast(&self, body: &str, exclude: &[ConnId]) {
        let line: Arc<str> = stamped(&Local::now(), body).into();

        let failed: Vec<ConnId> = {
            let roster = self.roster.lock();
            roster
                .iter()
                .filter(|(id, _)| !exclude.contains(id))
                .filter_map(|(id, session)| match session.deliver(Arc::clone(&line)) {
                    Ok(()) => None,
                    Err(e) => {
                        debug!(conn = %id, error = %e, "Broadcast delivery failed");
                        Some(id)
                    }
                })
                .collect()
        };

        for id in failed {
            self.disconnect(id, "broken pipe");
        }
    }

    /// Send one line to one connection, exactly as given.
    pub fn unicast(&self, id: ConnId, text: impl Into<Arc<str>>) -> Result<(), DeliveryError> {
        let roster = self.roster.lock();
        let session = roster.session(id).ok_or(DeliveryError::Gone)?;
        session.deliver(text.into())
    }
}
