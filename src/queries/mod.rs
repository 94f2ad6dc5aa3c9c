//! Read-only views over the ledger, recomputed on every call.
//!
//! Date/time ordering compares `(date, time)` pairs, which is the same order
//! as comparing the stored zero-padded `YYYY-MM-DD` / `HH:MM` strings.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::{
    ledger::LedgerStore,
    models::{Client, Session, SessionStatus},
};

mod types;

pub use types::{ClientOverview, DashboardStats, HistoryFilter};

fn sort_ascending(sessions: &mut [&Session]) {
    sessions.sort_by_key(|session| session.slot());
}

fn sort_descending(sessions: &mut [&Session]) {
    sessions.sort_by(|a, b| b.slot().cmp(&a.slot()));
}

/// First day of the month before `today`'s month.
fn previous_month(today: NaiveDate) -> Option<NaiveDate> {
    let first_of_month = today.with_day(1)?;
    first_of_month.pred_opt()?.with_day(1)
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

impl HistoryFilter {
    pub fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::ThisMonth => same_month(date, today),
            HistoryFilter::LastMonth => {
                previous_month(today).is_some_and(|month| same_month(date, month))
            }
        }
    }
}

impl LedgerStore {
    pub fn sessions_for_client(&self, client_id: i64) -> Vec<&Session> {
        self.list_sessions()
            .iter()
            .filter(|session| session.client_id == client_id)
            .collect()
    }

    /// Live sessions from `today` on, soonest first.
    pub fn upcoming_for_client(&self, client_id: i64, today: NaiveDate) -> Vec<&Session> {
        let mut sessions: Vec<&Session> = self
            .sessions_for_client(client_id)
            .into_iter()
            .filter(|session| session.date >= today && session.is_live())
            .collect();
        sort_ascending(&mut sessions);
        sessions
    }

    /// Every session of the client within the month window, most recent
    /// first. Status is not filtered.
    pub fn history_for_client(
        &self,
        client_id: i64,
        filter: HistoryFilter,
        today: NaiveDate,
    ) -> Vec<&Session> {
        let mut sessions: Vec<&Session> = self
            .sessions_for_client(client_id)
            .into_iter()
            .filter(|session| filter.matches(session.date, today))
            .collect();
        sort_descending(&mut sessions);
        sessions
    }

    pub fn completed_for_client(&self, client_id: i64) -> Vec<&Session> {
        self.sessions_for_client(client_id)
            .into_iter()
            .filter(|session| session.status == SessionStatus::Completed)
            .collect()
    }

    /// Confirmed sessions on `today`, in booking order.
    pub fn today_sessions(&self, today: NaiveDate) -> Vec<&Session> {
        self.sessions_on_date(today)
            .into_iter()
            .filter(|session| session.status == SessionStatus::Upcoming)
            .collect()
    }

    pub fn upcoming_global(&self, today: NaiveDate, limit: usize) -> Vec<&Session> {
        let mut sessions: Vec<&Session> = self
            .list_sessions()
            .iter()
            .filter(|session| session.date >= today && session.status == SessionStatus::Upcoming)
            .collect();
        sort_ascending(&mut sessions);
        sessions.truncate(limit);
        sessions
    }

    /// The dashboard's "upcoming" panel: the first `limit` confirmed sessions
    /// with today's dropped afterwards, so it may hold fewer than `limit`.
    pub fn dashboard_upcoming(&self, today: NaiveDate, limit: usize) -> Vec<&Session> {
        self.upcoming_global(today, limit)
            .into_iter()
            .filter(|session| session.date != today)
            .collect()
    }

    pub fn sessions_on_date(&self, date: NaiveDate) -> Vec<&Session> {
        self.list_sessions()
            .iter()
            .filter(|session| session.date == date)
            .collect()
    }

    /// `None` lists every session.
    pub fn sessions_with_status(&self, status: Option<SessionStatus>) -> Vec<&Session> {
        self.list_sessions()
            .iter()
            .filter(|session| status.map_or(true, |status| session.status == status))
            .collect()
    }

    /// Per-day session counts for one calendar month; days without sessions
    /// are absent.
    pub fn session_counts_for_month(&self, year: i32, month: u32) -> BTreeMap<NaiveDate, usize> {
        let mut counts = BTreeMap::new();
        for session in self.list_sessions() {
            if session.date.year() == year && session.date.month() == month {
                *counts.entry(session.date).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn active_clients(&self) -> Vec<&Client> {
        self.list_clients()
            .iter()
            .filter(|client| client.is_active())
            .collect()
    }

    /// First client with this email. Duplicate emails shadow later clients.
    pub fn find_client_by_email(&self, email: &str) -> Option<&Client> {
        self.list_clients()
            .iter()
            .find(|client| client.email == email)
    }

    /// `None` when the booked client has since been deleted.
    pub fn client_for_session(&self, session: &Session) -> Option<&Client> {
        self.get_client(session.client_id)
    }

    pub fn dashboard_stats(&self, today: NaiveDate, payment_reminder_amount: u32) -> DashboardStats {
        let out_of_credit = self
            .active_clients()
            .into_iter()
            .filter(|client| client.sessions_remaining == 0)
            .count() as u64;

        DashboardStats {
            total_clients: self.list_clients().len(),
            sessions_today: self.today_sessions(today).len(),
            pending_payments: out_of_credit * u64::from(payment_reminder_amount),
        }
    }

    pub fn client_overview(&self, client_id: i64, today: NaiveDate) -> Option<ClientOverview> {
        let client = self.get_client(client_id)?;
        Some(ClientOverview {
            client_id: client.id,
            name: client.name.clone(),
            sessions_remaining: client.sessions_remaining,
            upcoming_count: self.upcoming_for_client(client.id, today).len(),
            completed_count: self.completed_for_client(client.id).len(),
        })
    }
}
