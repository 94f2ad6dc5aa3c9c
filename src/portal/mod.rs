//! Role-scoped entry points over the ledger.
//!
//! Both portals call the same [`LedgerStore`](crate::ledger::LedgerStore)
//! operations; they differ only in what they allow. The admin portal refuses
//! confirmed bookings for clients without credit. The client portal only
//! touches the signed-in client's own sessions and files every booking as
//! `pending`, with no credit check.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Role, SessionStatus, SessionTime, ValidationError};

mod admin;
mod client;

pub use admin::{AdminDashboard, AdminPortal};
pub use client::ClientPortal;

/// Refusals surfaced to the user. `Display` is the message to show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("Client has no remaining sessions!")]
    InsufficientCredit { client_id: i64 },

    #[error("Error: Client data not found")]
    ClientNotFound,

    #[error("Session {0} not found")]
    SessionNotFound(i64),

    #[error("Session {0} belongs to another client")]
    NotOwner(i64),

    #[error("Only pending or upcoming sessions can be cancelled (session {session_id} is {status})")]
    NotCancellable {
        session_id: i64,
        status: SessionStatus,
    },

    #[error("Only pending sessions can be confirmed (session {session_id} is {status})")]
    NotPending {
        session_id: i64,
        status: SessionStatus,
    },

    #[error("This portal is only available to {} accounts", .0.as_str())]
    Forbidden(Role),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// What either portal's booking form submits. The client is implied by the
/// portal (client side) or passed alongside (admin side).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time: SessionTime,
    pub duration: u32,
    pub workout_type: String,
    #[serde(default)]
    pub notes: String,
}
