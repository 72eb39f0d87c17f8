/// Session store behaviour through the public API
use mcp_http_server::SessionStore;

#[test]
fn test_ids_are_uuids() {
    let mut store = SessionStore::new();
    let id = store.create();
    assert!(uuid::Uuid::parse_str(&id).is_ok());
}

#[test]
fn test_many_sessions_are_unique() {
    let mut store = SessionStore::new();
    let ids: std::collections::HashSet<String> = (0..500).map(|_| store.create()).collect();
    assert_eq!(ids.len(), 500);
    assert_eq!(store.len(), 500);
}

#[test]
fn test_sweep_only_removes_idle_sessions() {
    let mut store = SessionStore::new();
    let idle = store.create();
    let busy = store.create();

    store.sweep();
    store.touch(&busy);
    store.sweep();

    assert!(!store.is_valid(&idle));
    assert!(store.is_valid(&busy));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_erased_session_is_not_revived() {
    let mut store = SessionStore::new();
    let id = store.create();
    store.erase(&id);

    store.touch(&id);
    store.sweep();
    assert!(!store.is_valid(&id));

    let replacement = store.create();
    assert_ne!(replacement, id);
}
