//! The client/session ledger.
//!
//! [`LedgerStore`] owns both collections in memory and writes the whole
//! collection back to [`Storage`] after every mutation. Credit moves in
//! exactly two places:
//!
//! - creating a session whose status is `upcoming` debits one credit, never
//!   going below zero;
//! - deleting a session that is still `pending` or `upcoming` refunds one
//!   credit, with no ceiling.
//!
//! Pending sessions are not debited on creation but are refunded on deletion.
//! Editing a session never moves credit, even when the edit changes `status`.

use crate::{
    log_info, log_warn,
    models::{
        Client, ClientInput, ClientPatch, Session, SessionInput, SessionPatch, SessionStatus,
        ValidationError,
    },
    storage::{Storage, CLIENTS_KEY, SESSIONS_KEY},
};

mod ids;
mod seed;

pub use ids::IdGenerator;
pub use seed::{sample_clients, sample_sessions};

const ENABLE_LOGS: bool = true;

pub struct LedgerStore {
    storage: Storage,
    clients: Vec<Client>,
    sessions: Vec<Session>,
    ids: IdGenerator,
}

impl LedgerStore {
    /// Loads both collections. Missing or malformed values start empty.
    pub fn load(storage: Storage) -> Self {
        let clients: Vec<Client> = storage.get(CLIENTS_KEY).unwrap_or_default();
        let sessions: Vec<Session> = storage.get(SESSIONS_KEY).unwrap_or_default();

        log_info!(
            "Ledger loaded with {} clients and {} sessions",
            clients.len(),
            sessions.len()
        );

        let ids = IdGenerator::starting_after(max_id(&clients, &sessions));
        Self {
            storage,
            clients,
            sessions,
            ids,
        }
    }

    /// Discards in-memory state and re-reads storage. Another store writing to
    /// the same backend is only observed after this.
    pub fn reload(&mut self) {
        let storage = self.storage.clone();
        *self = Self::load(storage);
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn list_clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn list_sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn get_client(&self, id: i64) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    pub fn get_session(&self, id: i64) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id == id)
    }

    /// Emails are not checked for uniqueness.
    pub fn create_client(&mut self, input: ClientInput) -> Result<Client, ValidationError> {
        input.validate()?;

        let client = input.into_client(self.ids.next_id());
        self.clients.push(client.clone());
        self.persist_clients();

        log_info!("Created client {} ({})", client.id, client.name);
        Ok(client)
    }

    /// An empty patch returns the client as is and writes nothing.
    pub fn update_client(
        &mut self,
        id: i64,
        patch: ClientPatch,
    ) -> Result<Option<Client>, ValidationError> {
        patch.validate()?;

        let Some(client) = self.clients.iter_mut().find(|client| client.id == id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(client.clone()));
        }
        patch.apply(client);
        let updated = client.clone();
        self.persist_clients();

        Ok(Some(updated))
    }

    /// Sessions booked for the client are left in place.
    pub fn delete_client(&mut self, id: i64) -> Option<Client> {
        let index = self.clients.iter().position(|client| client.id == id);
        let removed = index.map(|index| self.clients.remove(index));
        self.persist_clients();

        if let Some(client) = &removed {
            let orphaned = self
                .sessions
                .iter()
                .filter(|session| session.client_id == client.id)
                .count();
            log_info!(
                "Deleted client {} ({}); {} sessions keep a dangling reference",
                client.id,
                client.name,
                orphaned
            );
        }
        removed
    }

    /// Creating an `upcoming` session debits the client when they have credit
    /// left. A client at zero still gets the session.
    pub fn create_session(&mut self, input: SessionInput) -> Result<Session, ValidationError> {
        input.validate()?;

        let session = input.into_session(self.ids.next_id());
        self.sessions.push(session.clone());
        self.persist_sessions();

        if session.status == SessionStatus::Upcoming {
            self.debit(session.client_id);
        }

        Ok(session)
    }

    /// Field merge only; credit is untouched whatever the patch contains. An
    /// empty patch writes nothing.
    pub fn update_session(
        &mut self,
        id: i64,
        patch: SessionPatch,
    ) -> Result<Option<Session>, ValidationError> {
        patch.validate()?;

        let Some(session) = self.sessions.iter_mut().find(|session| session.id == id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(session.clone()));
        }
        patch.apply(session);
        let updated = session.clone();
        self.persist_sessions();

        Ok(Some(updated))
    }

    /// Removes the session and refunds one credit if it was still pending or
    /// upcoming. Completed and unknown sessions refund nothing.
    pub fn delete_session(&mut self, id: i64) -> Option<Session> {
        let index = self.sessions.iter().position(|session| session.id == id);
        let removed = index.map(|index| self.sessions.remove(index));

        if let Some(session) = &removed {
            if session.is_live() {
                self.refund(session.client_id);
            }
        }

        self.persist_sessions();
        removed
    }

    /// Moves a pending request to `upcoming` and applies the same debit as
    /// booking it directly. Sessions in any other state come back unchanged.
    pub fn confirm_session(&mut self, id: i64) -> Option<Session> {
        let session = self.sessions.iter_mut().find(|session| session.id == id)?;
        if session.status != SessionStatus::Pending {
            return Some(session.clone());
        }

        session.status = SessionStatus::Upcoming;
        let confirmed = session.clone();
        self.persist_sessions();
        self.debit(confirmed.client_id);

        log_info!("Confirmed session {}", confirmed.id);
        Some(confirmed)
    }

    fn debit(&mut self, client_id: i64) -> bool {
        let Some(client) = self.clients.iter_mut().find(|client| client.id == client_id) else {
            log_warn!("No client {client_id} to debit; session booked without credit change");
            return false;
        };
        if client.sessions_remaining == 0 {
            log_info!("Client {client_id} has no credit left; balance stays at 0");
            return false;
        }

        client.sessions_remaining -= 1;
        log::debug!(
            "Debited client {client_id}; {} sessions remaining",
            client.sessions_remaining
        );
        self.persist_clients();
        true
    }

    fn refund(&mut self, client_id: i64) -> bool {
        let Some(client) = self.clients.iter_mut().find(|client| client.id == client_id) else {
            log_warn!("No client {client_id} to refund; credit dropped");
            return false;
        };

        client.sessions_remaining = client.sessions_remaining.saturating_add(1);
        log::debug!(
            "Refunded client {client_id}; {} sessions remaining",
            client.sessions_remaining
        );
        self.persist_clients();
        true
    }

    fn persist_clients(&self) -> bool {
        self.storage.set(CLIENTS_KEY, &self.clients)
    }

    fn persist_sessions(&self) -> bool {
        self.storage.set(SESSIONS_KEY, &self.sessions)
    }
}

fn max_id(clients: &[Client], sessions: &[Session]) -> i64 {
    let client_max = clients.iter().map(|client| client.id).max().unwrap_or(0);
    let session_max = sessions.iter().map(|session| session.id).max().unwrap_or(0);
    client_max.max(session_max)
}
