//! Sign-in against the stored `users` directory and the `currentUser` record.
//!
//! Credentials are compared as stored. Nothing here touches the ledger; the
//! client portal joins a signed-in user to their client record by email.

use thiserror::Error;

use crate::{
    ledger::IdGenerator,
    log_info, log_warn,
    models::{AdminAccount, ClientAccount, CurrentUser, Role, UserDirectory},
    storage::{Storage, CURRENT_USER_KEY, USERS_KEY},
};

const ENABLE_LOGS: bool = true;

const DEFAULT_CLIENT_PASSWORD: &str = "client123";
const DEFAULT_CLIENTS: [(&str, &str); 3] = [
    ("John Smith", "john.smith@email.com"),
    ("Sarah Johnson", "sarah.j@email.com"),
    ("Mike Williams", "mike.w@email.com"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid admin credentials")]
    InvalidAdminCredentials,
    #[error("Invalid client credentials")]
    InvalidClientCredentials,
}

/// The directory written on first start.
pub fn default_directory(ids: &mut IdGenerator) -> UserDirectory {
    UserDirectory {
        admin: AdminAccount {
            email: "admin@fittrack.com".into(),
            password: "admin123".into(),
            role: Role::Admin,
            name: "Admin User".into(),
        },
        clients: DEFAULT_CLIENTS
            .iter()
            .map(|(name, email)| ClientAccount {
                id: ids.next_id(),
                email: email.to_string(),
                password: DEFAULT_CLIENT_PASSWORD.into(),
                role: Role::Client,
                name: name.to_string(),
            })
            .collect(),
    }
}

pub struct Accounts {
    storage: Storage,
    users: UserDirectory,
}

impl Accounts {
    /// Loads the directory, writing the default one when it is absent or
    /// unreadable.
    pub fn load(storage: Storage) -> Self {
        let users = match storage.get::<UserDirectory>(USERS_KEY) {
            Some(users) => users,
            None => {
                log_warn!("No user directory found; writing the default accounts");
                let users = default_directory(&mut IdGenerator::starting_after(0));
                storage.set(USERS_KEY, &users);
                users
            }
        };
        Self { storage, users }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.users
    }

    /// Checks credentials for the chosen role and, on success, records the
    /// signed-in user.
    pub fn login(&self, email: &str, password: &str, role: Role) -> Result<CurrentUser, AuthError> {
        let user = match role {
            Role::Admin => self.validate_admin(email, password)?,
            Role::Client => self.validate_client(email, password)?,
        };
        self.set_current_user(&user);
        log_info!("{} signed in as {}", user.email, role.as_str());
        Ok(user)
    }

    fn validate_admin(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let admin = &self.users.admin;
        if admin.email != email || admin.password != password {
            return Err(AuthError::InvalidAdminCredentials);
        }
        Ok(CurrentUser {
            id: None,
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: Role::Admin,
        })
    }

    fn validate_client(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        self.users
            .clients
            .iter()
            .find(|account| account.email == email && account.password == password)
            .map(|account| CurrentUser {
                id: Some(account.id),
                email: account.email.clone(),
                name: account.name.clone(),
                role: Role::Client,
            })
            .ok_or(AuthError::InvalidClientCredentials)
    }

    pub fn set_current_user(&self, user: &CurrentUser) -> bool {
        self.storage.set(CURRENT_USER_KEY, user)
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.storage.get(CURRENT_USER_KEY)
    }

    pub fn logout(&self) -> bool {
        self.storage.remove(CURRENT_USER_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_default_directory() {
        let storage = Storage::in_memory();
        let accounts = Accounts::load(storage.clone());

        let stored: UserDirectory = storage.get(USERS_KEY).unwrap();
        assert_eq!(&stored, accounts.directory());
        assert_eq!(stored.admin.email, "admin@fittrack.com");
        assert_eq!(stored.clients.len(), 3);
        assert!(stored.clients.iter().all(|c| c.password == "client123"));
        assert!(stored.clients.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn existing_directory_is_kept() {
        let storage = Storage::in_memory();
        let mut users = default_directory(&mut IdGenerator::starting_after(0));
        users.admin.password = "changed".into();
        storage.set(USERS_KEY, &users);

        let accounts = Accounts::load(storage);
        assert_eq!(accounts.directory().admin.password, "changed");
    }

    #[test]
    fn malformed_directory_is_replaced() {
        let storage = Storage::in_memory();
        storage.set(USERS_KEY, &"not a directory");
        let accounts = Accounts::load(storage);
        assert_eq!(accounts.directory().admin.password, "admin123");
    }

    #[test]
    fn admin_login_records_current_user() {
        let accounts = Accounts::load(Storage::in_memory());
        assert_eq!(accounts.current_user(), None);

        let user = accounts
            .login("admin@fittrack.com", "admin123", Role::Admin)
            .unwrap();
        assert!(user.is_admin());
        assert_eq!(user.id, None);
        assert_eq!(accounts.current_user(), Some(user));

        assert!(accounts.logout());
        assert_eq!(accounts.current_user(), None);
    }

    #[test]
    fn client_login_carries_account_id() {
        let accounts = Accounts::load(Storage::in_memory());
        let expected = accounts.directory().clients[1].id;

        let user = accounts
            .login("sarah.j@email.com", "client123", Role::Client)
            .unwrap();
        assert_eq!(user.id, Some(expected));
        assert_eq!(user.name, "Sarah Johnson");
        assert_eq!(user.role, Role::Client);
    }

    #[test]
    fn wrong_credentials_are_rejected_per_role() {
        let accounts = Accounts::load(Storage::in_memory());

        let err = accounts
            .login("admin@fittrack.com", "nope", Role::Admin)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid admin credentials");

        // Admin credentials don't open the client side.
        let err = accounts
            .login("admin@fittrack.com", "admin123", Role::Client)
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidClientCredentials);
        assert_eq!(accounts.current_user(), None);
    }
}
