use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookingRequest, PortalError};
use crate::{
    ledger::LedgerStore,
    log_info,
    models::{
        Client, ClientInput, ClientPatch, CurrentUser, Role, Session, SessionInput, SessionPatch,
        SessionStatus,
    },
    queries::DashboardStats,
    settings::AppSettings,
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: DashboardStats,
    pub today: Vec<Session>,
    pub upcoming: Vec<Session>,
}

/// The trainer's view: full access to clients and sessions.
pub struct AdminPortal<'a> {
    ledger: &'a mut LedgerStore,
}

impl<'a> AdminPortal<'a> {
    pub fn new(ledger: &'a mut LedgerStore, user: &CurrentUser) -> Result<Self, PortalError> {
        if user.role != Role::Admin {
            return Err(PortalError::Forbidden(Role::Admin));
        }
        Ok(Self { ledger })
    }

    pub fn ledger(&self) -> &LedgerStore {
        &*self.ledger
    }

    /// Books a confirmed session. Refused without mutation when the client
    /// has no credit left.
    pub fn book_session(
        &mut self,
        client_id: i64,
        request: BookingRequest,
    ) -> Result<Session, PortalError> {
        let client = self
            .ledger
            .get_client(client_id)
            .ok_or(PortalError::ClientNotFound)?;
        if !client.has_credit() {
            return Err(PortalError::InsufficientCredit { client_id });
        }

        let input = SessionInput {
            client_id,
            client_name: client.name.clone(),
            date: request.date,
            time: request.time,
            duration: request.duration,
            workout_type: request.workout_type,
            status: SessionStatus::Upcoming,
            notes: request.notes,
        };
        let session = self.ledger.create_session(input)?;

        log_info!("Admin booked session {} for client {client_id}", session.id);
        Ok(session)
    }

    /// Field edits only; credit never moves here. Reassigning the session
    /// to another client refreshes its `client_name` snapshot.
    pub fn edit_session(
        &mut self,
        id: i64,
        mut patch: SessionPatch,
    ) -> Result<Session, PortalError> {
        if let Some(client_id) = patch.client_id {
            let client = self
                .ledger
                .get_client(client_id)
                .ok_or(PortalError::ClientNotFound)?;
            patch.client_name = Some(client.name.clone());
        }

        self.ledger
            .update_session(id, patch)?
            .ok_or(PortalError::SessionNotFound(id))
    }

    /// Cancels any session. Live ones refund a credit.
    pub fn cancel_session(&mut self, id: i64) -> Result<Session, PortalError> {
        self.ledger
            .delete_session(id)
            .ok_or(PortalError::SessionNotFound(id))
    }

    /// Approves a client's pending request, debiting one credit. Guarded the
    /// same way as a direct booking.
    pub fn confirm_session(&mut self, id: i64) -> Result<Session, PortalError> {
        let session = self
            .ledger
            .get_session(id)
            .ok_or(PortalError::SessionNotFound(id))?;
        if session.status != SessionStatus::Pending {
            return Err(PortalError::NotPending {
                session_id: id,
                status: session.status,
            });
        }

        let client_id = session.client_id;
        let client = self
            .ledger
            .get_client(client_id)
            .ok_or(PortalError::ClientNotFound)?;
        if !client.has_credit() {
            return Err(PortalError::InsufficientCredit { client_id });
        }

        self.ledger
            .confirm_session(id)
            .ok_or(PortalError::SessionNotFound(id))
    }

    pub fn add_client(&mut self, input: ClientInput) -> Result<Client, PortalError> {
        Ok(self.ledger.create_client(input)?)
    }

    pub fn edit_client(&mut self, id: i64, patch: ClientPatch) -> Result<Client, PortalError> {
        self.ledger
            .update_client(id, patch)?
            .ok_or(PortalError::ClientNotFound)
    }

    /// Their sessions stay behind with a dangling client reference.
    pub fn delete_client(&mut self, id: i64) -> Result<Client, PortalError> {
        self.ledger
            .delete_client(id)
            .ok_or(PortalError::ClientNotFound)
    }

    pub fn dashboard(&self, today: NaiveDate, settings: &AppSettings) -> AdminDashboard {
        AdminDashboard {
            stats: self
                .ledger
                .dashboard_stats(today, settings.payment_reminder_amount),
            today: self
                .ledger
                .today_sessions(today)
                .into_iter()
                .cloned()
                .collect(),
            upcoming: self
                .ledger
                .dashboard_upcoming(today, settings.upcoming_limit)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Sessions table; `None` shows every status.
    pub fn sessions_table(&self, status: Option<SessionStatus>) -> Vec<Session> {
        self.ledger
            .sessions_with_status(status)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn sessions_on_date(&self, date: NaiveDate) -> Vec<Session> {
        self.ledger
            .sessions_on_date(date)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Clients offered in the booking form.
    pub fn bookable_clients(&self) -> Vec<Client> {
        self.ledger
            .active_clients()
            .into_iter()
            .cloned()
            .collect()
    }
}
