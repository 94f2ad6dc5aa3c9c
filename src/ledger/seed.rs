//! Demo roster written on first start so the dashboards are not empty.

use chrono::{Days, NaiveDate};

use super::{IdGenerator, LedgerStore, ENABLE_LOGS};
use crate::{
    log_info,
    models::{Client, ClientStatus, Session, SessionStatus, SessionTime},
};

struct SampleClient {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    sessions_remaining: u32,
}

const SAMPLE_CLIENTS: [SampleClient; 3] = [
    SampleClient {
        name: "John Smith",
        email: "john.smith@email.com",
        phone: "(555) 123-4567",
        sessions_remaining: 8,
    },
    SampleClient {
        name: "Sarah Johnson",
        email: "sarah.j@email.com",
        phone: "(555) 234-5678",
        sessions_remaining: 12,
    },
    SampleClient {
        name: "Mike Williams",
        email: "mike.w@email.com",
        phone: "(555) 345-6789",
        sessions_remaining: 5,
    },
];

/// (days from today, hour, minutes long, workout type), paired with the
/// roster in order.
const SAMPLE_SESSIONS: [(u64, u32, u32, &str); 3] = [
    (0, 9, 60, "Strength Training"),
    (0, 14, 60, "HIIT"),
    (1, 10, 45, "Cardio"),
];

pub fn sample_clients(ids: &mut IdGenerator) -> Vec<Client> {
    SAMPLE_CLIENTS
        .iter()
        .map(|sample| Client {
            id: ids.next_id(),
            name: sample.name.to_string(),
            email: sample.email.to_string(),
            phone: sample.phone.to_string(),
            sessions_remaining: sample.sessions_remaining,
            status: ClientStatus::Active,
        })
        .collect()
}

/// One upcoming session per client, for as many clients as there are sample
/// slots. Seeded sessions are written directly and move no credit.
pub fn sample_sessions(clients: &[Client], today: NaiveDate, ids: &mut IdGenerator) -> Vec<Session> {
    clients
        .iter()
        .zip(SAMPLE_SESSIONS.iter())
        .filter_map(|(client, &(offset, hour, duration, workout_type))| {
            let date = today.checked_add_days(Days::new(offset))?;
            let time = SessionTime::from_hm(hour, 0)?;
            Some(Session {
                id: ids.next_id(),
                client_id: client.id,
                client_name: client.name.clone(),
                date,
                time,
                duration,
                workout_type: workout_type.to_string(),
                status: SessionStatus::Upcoming,
                notes: String::new(),
            })
        })
        .collect()
}

impl LedgerStore {
    /// Seeds whichever collection is empty. Returns true when anything was
    /// written.
    pub fn seed_if_empty(&mut self, today: NaiveDate) -> bool {
        let mut seeded = false;

        if self.clients.is_empty() {
            self.clients = sample_clients(&mut self.ids);
            self.persist_clients();
            log_info!("Seeded {} sample clients", self.clients.len());
            seeded = true;
        }

        if self.sessions.is_empty() {
            self.sessions = sample_sessions(&self.clients, today, &mut self.ids);
            self.persist_sessions();
            log_info!("Seeded {} sample sessions", self.sessions.len());
            seeded = true;
        }

        seeded
    }
}
