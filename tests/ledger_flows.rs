use chrono::{NaiveDate, NaiveTime};
use fittrack_lib::{
    accounts::Accounts,
    models::{Client, ClientStatus, CurrentUser, Role, SessionStatus, SessionTime},
    open_storage,
    storage::CLIENTS_KEY,
    AdminPortal, BookingRequest, ClientPortal, LedgerStore, PortalError, Storage,
    StorageBackendKind,
};

fn john(remaining: u32) -> Client {
    Client {
        id: 1,
        name: "John Smith".into(),
        email: "john.smith@email.com".into(),
        phone: "(555) 123-4567".into(),
        sessions_remaining: remaining,
        status: ClientStatus::Active,
    }
}

fn store_with_john(remaining: u32) -> (Storage, LedgerStore) {
    let storage = Storage::in_memory();
    assert!(storage.set(CLIENTS_KEY, &vec![john(remaining)]));
    let ledger = LedgerStore::load(storage.clone());
    (storage, ledger)
}

fn signed_in(accounts: &Accounts, email: &str, password: &str, role: Role) -> CurrentUser {
    accounts.login(email, password, role).unwrap()
}

fn booking(date: NaiveDate, hour: u32) -> BookingRequest {
    BookingRequest {
        date,
        time: SessionTime::from_hm(hour, 0).unwrap(),
        duration: 60,
        workout_type: "Strength Training".into(),
        notes: String::new(),
    }
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

#[test]
fn pending_request_then_direct_booking_leaves_request_behind() {
    let (storage, mut ledger) = store_with_john(8);
    let accounts = Accounts::load(storage.clone());
    let client = signed_in(&accounts, "john.smith@email.com", "client123", Role::Client);
    let admin = signed_in(&accounts, "admin@fittrack.com", "admin123", Role::Admin);

    let pending = ClientPortal::new(&mut ledger, client)
        .unwrap()
        .request_session(booking(march(10), 14))
        .unwrap();
    assert_eq!(pending.status, SessionStatus::Pending);
    assert_eq!(pending.client_id, 1);
    assert_eq!(ledger.get_client(1).unwrap().sessions_remaining, 8);

    let booked = AdminPortal::new(&mut ledger, &admin)
        .unwrap()
        .book_session(1, booking(march(10), 14))
        .unwrap();
    assert_eq!(booked.status, SessionStatus::Upcoming);
    assert_eq!(ledger.get_client(1).unwrap().sessions_remaining, 7);

    // Booking directly does not resolve the request.
    let still_pending = ledger.get_session(pending.id).unwrap();
    assert_eq!(still_pending.status, SessionStatus::Pending);
    assert_eq!(ledger.list_sessions().len(), 2);

    // What was written matches what a fresh load sees.
    let reloaded = LedgerStore::load(storage);
    assert_eq!(reloaded.list_sessions(), ledger.list_sessions());
    assert_eq!(reloaded.get_client(1).unwrap().sessions_remaining, 7);
}

#[test]
fn zero_balance_client_may_request_but_admin_may_not_book() {
    let (storage, mut ledger) = store_with_john(0);
    let accounts = Accounts::load(storage);
    let client = signed_in(&accounts, "john.smith@email.com", "client123", Role::Client);
    let admin = signed_in(&accounts, "admin@fittrack.com", "admin123", Role::Admin);

    let pending = ClientPortal::new(&mut ledger, client)
        .unwrap()
        .request_session(booking(march(10), 14))
        .unwrap();
    assert_eq!(pending.status, SessionStatus::Pending);

    let err = AdminPortal::new(&mut ledger, &admin)
        .unwrap()
        .book_session(1, booking(march(10), 15))
        .unwrap_err();
    assert_eq!(err, PortalError::InsufficientCredit { client_id: 1 });
    assert_eq!(ledger.list_sessions().len(), 1);
    assert_eq!(ledger.get_client(1).unwrap().sessions_remaining, 0);
}

#[test]
fn deleted_client_leaves_sessions_readable() {
    let (_, mut ledger) = store_with_john(3);
    let admin = CurrentUser {
        id: None,
        email: "admin@fittrack.com".into(),
        name: "Admin User".into(),
        role: Role::Admin,
    };

    let mut portal = AdminPortal::new(&mut ledger, &admin).unwrap();
    let session = portal.book_session(1, booking(march(10), 9)).unwrap();
    portal.delete_client(1).unwrap();

    let table = portal.sessions_table(None);
    assert_eq!(table.len(), 1);
    assert_eq!(table[0].client_name, "John Smith");
    assert!(portal.ledger().client_for_session(&table[0]).is_none());

    // No client left to refund.
    portal.cancel_session(session.id).unwrap();
    assert!(portal.ledger().list_clients().is_empty());
}

#[test]
fn sqlite_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let today = march(10);

    let storage = open_storage(StorageBackendKind::Sqlite, dir.path()).unwrap();
    let mut ledger = LedgerStore::load(storage);
    assert!(ledger.seed_if_empty(today));
    let first = ledger.list_clients()[0].id;
    let removed = ledger.list_sessions()[0].id;
    ledger.delete_session(removed).unwrap();

    let reopened = LedgerStore::load(open_storage(StorageBackendKind::Sqlite, dir.path()).unwrap());
    assert_eq!(reopened.list_clients(), ledger.list_clients());
    assert_eq!(reopened.list_sessions().len(), 2);
    // Seeded with 8, refunded once.
    assert_eq!(reopened.get_client(first).unwrap().sessions_remaining, 9);
}

#[test]
fn json_file_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let today = march(10);

    let storage = open_storage(StorageBackendKind::JsonFile, dir.path()).unwrap();
    let mut ledger = LedgerStore::load(storage.clone());
    assert!(ledger.seed_if_empty(today));
    let accounts = Accounts::load(storage);
    signed_in(&accounts, "sarah.j@email.com", "client123", Role::Client);

    let reopened_storage = open_storage(StorageBackendKind::JsonFile, dir.path()).unwrap();
    let reopened = LedgerStore::load(reopened_storage.clone());
    assert_eq!(reopened.list_sessions(), ledger.list_sessions());
    assert_eq!(
        reopened.list_sessions()[0].time.as_naive(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    );

    let user = Accounts::load(reopened_storage).current_user().unwrap();
    assert_eq!(user.email, "sarah.j@email.com");
}
