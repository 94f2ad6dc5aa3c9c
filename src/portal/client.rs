use chrono::NaiveDate;

use super::{BookingRequest, PortalError};
use crate::{
    ledger::LedgerStore,
    log_info,
    models::{Client, CurrentUser, Role, Session, SessionInput, SessionStatus},
    queries::{ClientOverview, HistoryFilter},
};

const ENABLE_LOGS: bool = true;

/// The signed-in client's view. Their record is found by email on every call,
/// so an admin edit to the roster is picked up without re-creating the
/// portal.
pub struct ClientPortal<'a> {
    ledger: &'a mut LedgerStore,
    user: CurrentUser,
}

impl<'a> ClientPortal<'a> {
    pub fn new(ledger: &'a mut LedgerStore, user: CurrentUser) -> Result<Self, PortalError> {
        if user.role != Role::Client {
            return Err(PortalError::Forbidden(Role::Client));
        }
        Ok(Self { ledger, user })
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn client(&self) -> Option<&Client> {
        self.ledger.find_client_by_email(&self.user.email)
    }

    fn client_id(&self) -> Result<i64, PortalError> {
        self.client()
            .map(|client| client.id)
            .ok_or(PortalError::ClientNotFound)
    }

    pub fn overview(&self, today: NaiveDate) -> Result<ClientOverview, PortalError> {
        let client_id = self.client_id()?;
        self.ledger
            .client_overview(client_id, today)
            .ok_or(PortalError::ClientNotFound)
    }

    pub fn upcoming(&self, today: NaiveDate) -> Result<Vec<Session>, PortalError> {
        let client_id = self.client_id()?;
        Ok(self
            .ledger
            .upcoming_for_client(client_id, today)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn history(
        &self,
        filter: HistoryFilter,
        today: NaiveDate,
    ) -> Result<Vec<Session>, PortalError> {
        let client_id = self.client_id()?;
        Ok(self
            .ledger
            .history_for_client(client_id, filter, today)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Files a pending request. Pending consumes no credit, so a client at
    /// zero balance can still ask.
    pub fn request_session(&mut self, request: BookingRequest) -> Result<Session, PortalError> {
        let client = self.client().ok_or(PortalError::ClientNotFound)?;

        let input = SessionInput {
            client_id: client.id,
            client_name: client.name.clone(),
            date: request.date,
            time: request.time,
            duration: request.duration,
            workout_type: request.workout_type,
            status: SessionStatus::Pending,
            notes: request.notes,
        };
        let session = self.ledger.create_session(input)?;

        log_info!(
            "Client {} requested session {} on {} {}",
            session.client_id,
            session.id,
            session.date,
            session.time
        );
        Ok(session)
    }

    /// Cancels one of the client's own live sessions, refunding a credit.
    pub fn cancel_session(&mut self, id: i64) -> Result<Session, PortalError> {
        let client_id = self.client_id()?;
        let session = self
            .ledger
            .get_session(id)
            .ok_or(PortalError::SessionNotFound(id))?;

        if session.client_id != client_id {
            return Err(PortalError::NotOwner(id));
        }
        if !session.is_live() {
            return Err(PortalError::NotCancellable {
                session_id: id,
                status: session.status,
            });
        }

        self.ledger
            .delete_session(id)
            .ok_or(PortalError::SessionNotFound(id))
    }
}
