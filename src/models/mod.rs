//! Ledger records as they are persisted under the `clients`, `sessions`,
//! `users` and `currentUser` storage keys.

pub mod client;
pub mod session;
pub mod user;
pub mod validation;

pub use client::{Client, ClientInput, ClientPatch, ClientStatus};
pub use session::{Session, SessionInput, SessionPatch, SessionStatus, SessionTime};
pub use user::{AdminAccount, ClientAccount, CurrentUser, Role, UserDirectory};
pub use validation::ValidationError;
