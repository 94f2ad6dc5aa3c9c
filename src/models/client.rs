use serde::{Deserialize, Serialize};

use super::validation::{
    validate_email, validate_phone, validate_text, ValidationError,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClientStatus {
    Active,
    Inactive,
}

impl Default for ClientStatus {
    fn default() -> Self {
        ClientStatus::Active
    }
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "Active",
            ClientStatus::Inactive => "Inactive",
        }
    }
}

/// A training client and their prepaid session balance.
///
/// `email` doubles as the client's login identity: the client portal finds
/// its record by matching the signed-in user's email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub sessions_remaining: u32,
    #[serde(default)]
    pub status: ClientStatus,
}

impl Client {
    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }

    pub fn has_credit(&self) -> bool {
        self.sessions_remaining > 0
    }
}

/// Input data for creating a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub sessions_remaining: u32,
    #[serde(default)]
    pub status: ClientStatus,
}

impl ClientInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text("name", &self.name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        Ok(())
    }

    pub(crate) fn into_client(self, id: i64) -> Client {
        Client {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            sessions_remaining: self.sessions_remaining,
            status: self.status,
        }
    }
}

/// Partial update for a client. Fields left as `None` keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sessions_remaining: Option<u32>,
    pub status: Option<ClientStatus>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_text("name", name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }

    pub(crate) fn apply(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(email) = self.email {
            client.email = email;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
        if let Some(remaining) = self.sessions_remaining {
            client.sessions_remaining = remaining;
        }
        if let Some(status) = self.status {
            client.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_stored_record_shape() {
        let raw = json!({
            "id": 1741600000001i64,
            "name": "John Smith",
            "email": "john.smith@email.com",
            "phone": "(555) 123-4567",
            "sessionsRemaining": 8,
            "status": "Active"
        });
        let client: Client = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(client.sessions_remaining, 8);
        assert!(client.is_active());
        assert_eq!(serde_json::to_value(&client).unwrap(), raw);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut client = ClientInput {
            name: "Mike Williams".into(),
            email: "mike.w@email.com".into(),
            phone: "(555) 345-6789".into(),
            sessions_remaining: 5,
            status: ClientStatus::Active,
        }
        .into_client(3);

        ClientPatch {
            sessions_remaining: Some(10),
            status: Some(ClientStatus::Inactive),
            ..Default::default()
        }
        .apply(&mut client);

        assert_eq!(client.name, "Mike Williams");
        assert_eq!(client.sessions_remaining, 10);
        assert_eq!(client.status, ClientStatus::Inactive);
    }

    #[test]
    fn patch_validation_checks_each_present_field() {
        let patch = ClientPatch {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(ClientPatch::default().validate().is_ok());
        assert!(ClientPatch::default().is_empty());
    }
}
