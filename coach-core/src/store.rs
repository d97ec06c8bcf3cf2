//! # Profile storage
//!
//! [`ProfileStore`] is the keyed store the router and the reminder sweep work against;
//! [`InMemoryProfileStore`] keeps everything in process memory (lost on restart).
//! A persistent backend implements the same trait.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::Result;
use crate::profile::Profile;

/// Keyed profile storage.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns the profile for `user_id`, creating and storing a default one on first access.
    async fn get_or_create(&self, user_id: &str) -> Result<Profile>;

    /// Returns the profile for `user_id` without creating it.
    async fn get(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Replaces the stored profile for `user_id`.
    async fn update(&self, user_id: &str, profile: Profile) -> Result<()>;

    /// Snapshot of all profiles as `(user_id, profile)` pairs.
    async fn all(&self) -> Result<Vec<(String, Profile)>>;
}

/// In-memory profile store. Profiles of users in the premium allowlist are created premium.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
    premium_users: Arc<HashSet<String>>,
}

impl InMemoryProfileStore {
    /// Creates an empty store with no premium users.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose new profiles are premium for the given user ids.
    pub fn with_premium_users<I, S>(premium_users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: Arc::default(),
            premium_users: Arc::new(premium_users.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of stored profiles.
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_or_create(&self, user_id: &str) -> Result<Profile> {
        if let Some(profile) = self.profiles.read().await.get(user_id) {
            return Ok(profile.clone());
        }
        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(user_id.to_string()).or_insert_with(|| {
            let is_premium = self.premium_users.contains(user_id);
            info!(user_id = %user_id, is_premium, "Created profile");
            Profile::new(is_premium)
        });
        Ok(profile.clone())
    }

    async fn get(&self, user_id: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn update(&self, user_id: &str, profile: Profile) -> Result<()> {
        self.profiles
            .write()
            .await
            .insert(user_id.to_string(), profile);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<(String, Profile)>> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .map(|(id, p)| (id.clone(), p.clone()))
            .collect())
    }
}
