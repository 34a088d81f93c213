// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::create_test_user;

#[test]
fn test_create_and_get_session() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user_id = create_test_user(&mut persistence, "aaaaaaaaaaaaaaa", "alice01");

    let session_id = persistence
        .create_session("token-abc", &user_id, "2024-07-01T00:00:00Z")
        .unwrap();

    let session = persistence.get_session_by_token("token-abc").unwrap().unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.expires_at, "2024-07-01T00:00:00Z");

    persistence.update_session_activity(session_id).unwrap();
}

#[test]
fn test_unknown_session_is_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.get_session_by_token("missing").unwrap().is_none());
}

#[test]
fn test_session_requires_existing_user() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let ghost = meal_order_domain::UserId::new("ghost0000000000").unwrap();

    assert!(
        persistence
            .create_session("token-ghost", &ghost, "2024-07-01T00:00:00Z")
            .is_err()
    );
}

#[test]
fn test_delete_session_is_idempotent() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user_id = create_test_user(&mut persistence, "aaaaaaaaaaaaaaa", "alice01");
    persistence
        .create_session("token-abc", &user_id, "2024-07-01T00:00:00Z")
        .unwrap();

    assert!(persistence.delete_session("token-abc").unwrap());
    assert!(!persistence.delete_session("token-abc").unwrap());
    assert!(persistence.get_session_by_token("token-abc").unwrap().is_none());
}

#[test]
fn test_delete_expired_sessions() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user_id = create_test_user(&mut persistence, "aaaaaaaaaaaaaaa", "alice01");
    persistence
        .create_session("old", &user_id, "2024-06-01T00:00:00Z")
        .unwrap();
    persistence
        .create_session("fresh", &user_id, "2024-07-01T00:00:00Z")
        .unwrap();

    let removed = persistence
        .delete_expired_sessions("2024-06-15T00:00:00Z")
        .unwrap();

    assert_eq!(removed, 1);
    assert!(persistence.get_session_by_token("old").unwrap().is_none());
    assert!(persistence.get_session_by_token("fresh").unwrap().is_some());
}
