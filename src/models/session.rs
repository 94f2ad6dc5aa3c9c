//! Session-related data models.
//!
//! A session's `status` decides whether it is still a live reservation
//! (`Pending` / `Upcoming`) and therefore whether cancelling it returns a
//! credit to the client.

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::validation::{validate_duration, validate_notes, validate_text, ValidationError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Requested by the client, waiting for the trainer.
    Pending,
    /// Confirmed booking that consumed a credit.
    Upcoming,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Upcoming => "upcoming",
            SessionStatus::Completed => "completed",
        }
    }

    /// Live reservations can be cancelled and refund a credit when they are.
    pub fn is_live(&self) -> bool {
        matches!(self, SessionStatus::Pending | SessionStatus::Upcoming)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start time of a session, stored as zero-padded 24h `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionTime(NaiveTime);

impl SessionTime {
    const FORMAT: &'static str = "%H:%M";

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for SessionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for SessionTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, Self::FORMAT).map(Self)
    }
}

impl Serialize for SessionTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|err| de::Error::custom(format!("invalid session time '{raw}': {err}")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    /// Weak reference; the client may have been deleted since booking.
    pub client_id: i64,
    /// Snapshot of the client's name at booking time. Not kept in sync.
    pub client_name: String,
    pub date: NaiveDate,
    pub time: SessionTime,
    /// Minutes.
    pub duration: u32,
    pub workout_type: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub notes: String,
}

impl Session {
    /// Sort key; chronological because both parts are fixed-width.
    pub fn slot(&self) -> (NaiveDate, SessionTime) {
        (self.date, self.time)
    }

    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }
}

/// Input data for booking a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    pub client_id: i64,
    pub client_name: String,
    pub date: NaiveDate,
    pub time: SessionTime,
    pub duration: u32,
    pub workout_type: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub notes: String,
}

impl SessionInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_duration(self.duration)?;
        validate_text("workout type", &self.workout_type)?;
        validate_notes(&self.notes)?;
        Ok(())
    }

    pub(crate) fn into_session(self, id: i64) -> Session {
        Session {
            id,
            client_id: self.client_id,
            client_name: self.client_name,
            date: self.date,
            time: self.time,
            duration: self.duration,
            workout_type: self.workout_type,
            status: self.status,
            notes: self.notes,
        }
    }
}

/// Partial update for a session. Applying a patch never moves credit, even
/// when `status` is part of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<SessionTime>,
    pub duration: Option<u32>,
    pub workout_type: Option<String>,
    pub status: Option<SessionStatus>,
    pub notes: Option<String>,
}

impl SessionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(duration) = self.duration {
            validate_duration(duration)?;
        }
        if let Some(workout_type) = &self.workout_type {
            validate_text("workout type", workout_type)?;
        }
        if let Some(notes) = &self.notes {
            validate_notes(notes)?;
        }
        Ok(())
    }

    pub(crate) fn apply(self, session: &mut Session) {
        if let Some(client_id) = self.client_id {
            session.client_id = client_id;
        }
        if let Some(client_name) = self.client_name {
            session.client_name = client_name;
        }
        if let Some(date) = self.date {
            session.date = date;
        }
        if let Some(time) = self.time {
            session.time = time;
        }
        if let Some(duration) = self.duration {
            session.duration = duration;
        }
        if let Some(workout_type) = self.workout_type {
            session.workout_type = workout_type;
        }
        if let Some(status) = self.status {
            session.status = status;
        }
        if let Some(notes) = self.notes {
            session.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_time_is_zero_padded() {
        let time = SessionTime::from_hm(9, 5).unwrap();
        assert_eq!(time.to_string(), "09:05");
        assert_eq!(serde_json::to_value(time).unwrap(), json!("09:05"));
        assert_eq!("14:00".parse::<SessionTime>().unwrap(), SessionTime::from_hm(14, 0).unwrap());
        assert!("25:00".parse::<SessionTime>().is_err());
    }

    #[test]
    fn deserializes_stored_record_shape() {
        let raw = json!({
            "id": 1741600000002i64,
            "clientId": 1,
            "clientName": "John Smith",
            "date": "2025-03-10",
            "time": "14:00",
            "duration": 60,
            "workoutType": "Strength Training",
            "status": "pending",
            "notes": ""
        });
        let session: Session = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(session.status, SessionStatus::Pending);
        assert_eq!(session.date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(serde_json::to_value(&session).unwrap(), raw);
    }

    #[test]
    fn missing_notes_default_to_empty() {
        let raw = json!({
            "id": 7,
            "clientId": 1,
            "clientName": "John Smith",
            "date": "2025-03-10",
            "time": "09:00",
            "duration": 45,
            "workoutType": "Cardio",
            "status": "completed"
        });
        let session: Session = serde_json::from_value(raw).unwrap();
        assert!(session.notes.is_empty());
        assert!(!session.is_live());
    }

    #[test]
    fn slot_order_matches_chronology() {
        let early = SessionTime::from_hm(9, 0).unwrap();
        let late = SessionTime::from_hm(10, 30).unwrap();
        assert!(early < late);
        assert!(early.to_string() < late.to_string());
    }

    #[test]
    fn patch_rejects_zero_duration() {
        let patch = SessionPatch {
            duration: Some(0),
            ..Default::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::InvalidDuration(0)));
    }
}
