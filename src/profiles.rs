//! User profile storage
//!
//! Profiles are keyed by user id and overwritten on repeat requests (last
//! write wins). [`MemoryProfileStore`] is the in-process registry;
//! [`FileProfileStore`] adds one pretty-printed JSON file per user.

use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use tracing::warn;

use crate::errors::Result;
use crate::models::UserProfile;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>>;

    async fn put(&self, user_id: &str, profile: UserProfile) -> Result<()>;

    /// Known user ids, sorted
    async fn list_ids(&self) -> Result<Vec<String>>;
}

/// Concurrent in-memory map
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: DashMap<String, UserProfile>,
}

impl MemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, user_id: &str, profile: UserProfile) -> Result<()> {
        self.profiles.insert(user_id.to_string(), profile);
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.profiles.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}

/// Memory store backed by `<dir>/<user_id>_profile.json` files
#[derive(Debug)]
pub struct FileProfileStore {
    dir: PathBuf,
    cache: MemoryProfileStore,
}

const PROFILE_SUFFIX: &str = "_profile.json";

impl FileProfileStore {
    /// Open (and create if needed) the profile directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            cache: MemoryProfileStore::new(),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir
            .join(format!("{}{PROFILE_SUFFIX}", sanitize_user_id(user_id)))
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>> {
        if let Some(profile) = self.cache.get(user_id).await? {
            return Ok(Some(profile));
        }

        let path = self.path_for(user_id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let profile: UserProfile = serde_json::from_str(&content)?;
        debug!("Loaded profile {} from {}", user_id, path.display());
        self.cache.put(user_id, profile.clone()).await?;
        Ok(Some(profile))
    }

    async fn put(&self, user_id: &str, profile: UserProfile) -> Result<()> {
        let path = self.path_for(user_id);
        let json = serde_json::to_string_pretty(&profile)?;
        tokio::fs::write(&path, json).await?;
        debug!("Saved profile {} to {}", user_id, path.display());
        self.cache.put(user_id, profile).await
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = self.cache.list_ids().await?;

        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                warn!("Skipping non-UTF-8 file in {}", self.dir.display());
                continue;
            };
            if let Some(id) = name.strip_suffix(PROFILE_SUFFIX) {
                if !ids.iter().any(|known| known == id) {
                    ids.push(id.to_string());
                }
            }
        }

        ids.sort();
        Ok(ids)
    }
}

/// Restrict an id to `[A-Za-z0-9._-]` so it is safe as a file name.
///
/// Other characters become `_`; leading dots are dropped so an id can never
/// name a hidden file or walk up the directory tree.
#[must_use]
pub fn sanitize_user_id(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "user".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Fresh id for requests that carry no image file name
#[must_use]
pub fn generate_user_id() -> String {
    format!("user_{}", uuid::Uuid::new_v4().simple())
}
