#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the user directory

mod common;

use common::{create_module, create_place};
use places::{EntityKind, PlacesError, UserAccessLevel};
use tracing_test::traced_test;

#[tokio::test]
async fn test_sync_user_registers_then_is_idempotent() {
    let module = create_module();
    let users = module.users_api();

    let created = users.sync_user("100", "alice").await.unwrap();
    let again = users.sync_user("100", "alice").await.unwrap();
    assert_eq!(created, again);

    assert_eq!(users.get_user("100").await.unwrap().user_name, "alice");
    assert_eq!(users.find_user_by_name("alice").await.unwrap().tg_id, "100");
}

#[tokio::test]
async fn test_sync_user_propagates_rename_to_places() {
    let module = create_module();
    let users = module.users_api();
    let api = module.places_api();
    let (short_id, _) = create_place(api.as_ref(), "owner").await;

    users.sync_user("100", "alice").await.unwrap();
    api.add_user_access(&short_id, "alice", UserAccessLevel::Editable)
        .await
        .unwrap();

    let renamed = users.sync_user("100", "alicia").await.unwrap();
    assert_eq!(renamed.user_name, "alicia");

    let place = api.get_place(&short_id).await.unwrap();
    assert!(place.user_access("alice").is_none());
    assert_eq!(
        place.user_access("alicia").unwrap().level,
        UserAccessLevel::Editable
    );

    let err = users.find_user_by_name("alice").await.unwrap_err();
    assert_eq!(err, PlacesError::not_found(EntityKind::User, "alice"));
}

#[tokio::test]
#[traced_test]
async fn test_rename_of_user_without_grants_is_tolerated() {
    let module = create_module();
    let users = module.users_api();

    users.sync_user("200", "bob").await.unwrap();
    let renamed = users.sync_user("200", "robert").await.unwrap();

    assert_eq!(renamed.user_name, "robert");
    assert_eq!(users.get_user("200").await.unwrap().user_name, "robert");
    assert!(logs_contain("renamed user has no place grants"));
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let module = create_module();
    let users = module.users_api();

    let err = users.get_user("404").await.unwrap_err();
    assert_eq!(err, PlacesError::not_found(EntityKind::User, "404"));
}

#[tokio::test]
async fn test_sync_user_requires_name() {
    let module = create_module();
    let users = module.users_api();

    let err = users.sync_user("100", "").await.unwrap_err();
    assert!(err.is_validation());
}
