//! State management module.
//!
//! Contains the Hub (shared server state), the Roster it guards, and the
//! per-connection Session.

mod conn_id;
mod delivery;
mod hub;
mod roster;
mod session;

pub use conn_id::{ConnId, ConnIdGenerator};
pub use hub::Hub;
pub use roster::Roster;
pub use session::{Outbox, Session};
