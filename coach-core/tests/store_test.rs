//! Tests for [`coach_core::InMemoryProfileStore`].

use coach_core::{ConversationState, InMemoryProfileStore, ProfileStore};

/// **Test: get_or_create lazily creates a default profile once.**
#[tokio::test]
async fn get_or_create_creates_default_profile_once() {
    let store = InMemoryProfileStore::new();
    assert!(store.is_empty().await);

    let profile = store.get_or_create("42").await.unwrap();
    assert_eq!(profile.state, ConversationState::New);
    assert!(!profile.is_premium);
    assert!(profile.history.is_empty());

    store.get_or_create("42").await.unwrap();
    assert_eq!(store.len().await, 1);
}

/// **Test: get does not create profiles.**
#[tokio::test]
async fn get_does_not_create() {
    let store = InMemoryProfileStore::new();
    assert!(store.get("missing").await.unwrap().is_none());
    assert!(store.is_empty().await);
}

/// **Test: update replaces the stored profile and all returns snapshots.**
#[tokio::test]
async fn update_and_all_round_trip() {
    let store = InMemoryProfileStore::new();
    let mut profile = store.get_or_create("1").await.unwrap();
    profile.history.push_str("hello");
    store.update("1", profile.clone()).await.unwrap();
    store.get_or_create("2").await.unwrap();

    assert_eq!(store.get("1").await.unwrap(), Some(profile));
    let mut ids: Vec<String> = store.all().await.unwrap().into_iter().map(|(id, _)| id).collect();
    ids.sort();
    assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
}

/// **Test: users in the premium allowlist get premium profiles.**
#[tokio::test]
async fn premium_allowlist_applies_on_creation() {
    let store = InMemoryProfileStore::with_premium_users(["7"]);
    assert!(store.get_or_create("7").await.unwrap().is_premium);
    assert!(!store.get_or_create("8").await.unwrap().is_premium);
}
