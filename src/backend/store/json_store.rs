/**
 * JSON File Store
 *
 * Every entity type lives in its own file holding the whole collection as a
 * JSON array. Handlers load the full array, filter or mutate it in memory and
 * write the full array back. There is no index and no cache.
 *
 * # Consistency
 *
 * Read-modify-write cycles go through [`JsonStore::update`], which holds a
 * per-collection async lock for the whole cycle. Writes land in a temporary
 * file that is renamed over the collection file, so readers never observe a
 * half-written array.
 *
 * # Error Handling
 *
 * A missing collection file reads as an empty collection. An unparsable
 * file also loads as empty through [`JsonStore::load`] so read-only views
 * keep working, but [`JsonStore::update`] refuses to run on it: writing back
 * would replace records the process could not read. Any other I/O failure
 * is returned as a [`StoreError`].
 */
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::shared::models::{
    default_avatar, Comment, Follow, Like, Message, Notification, Post, RecordId, User,
};

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a collection file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file exists but does not hold the expected JSON array
    #[error("Corrupt collection file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The collections kept on disk, one file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Posts,
    Follows,
    Likes,
    Comments,
    Messages,
    Notifications,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Users,
        Collection::Posts,
        Collection::Follows,
        Collection::Likes,
        Collection::Comments,
        Collection::Messages,
        Collection::Notifications,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Users => "users.json",
            Collection::Posts => "posts.json",
            Collection::Follows => "follows.json",
            Collection::Likes => "likes.json",
            Collection::Comments => "comments.json",
            Collection::Messages => "messages.json",
            Collection::Notifications => "notifications.json",
        }
    }
}

/// A record type stored as one collection file
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;

    /// Numeric id, if the record has one
    fn record_id(&self) -> Option<RecordId>;
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;

    fn record_id(&self) -> Option<RecordId> {
        self.id.parse().ok()
    }
}

macro_rules! numeric_record {
    ($ty:ty, $collection:expr) => {
        impl Record for $ty {
            const COLLECTION: Collection = $collection;

            fn record_id(&self) -> Option<RecordId> {
                Some(self.id)
            }
        }
    };
}

numeric_record!(Post, Collection::Posts);
numeric_record!(Follow, Collection::Follows);
numeric_record!(Like, Collection::Likes);
numeric_record!(Comment, Collection::Comments);
numeric_record!(Message, Collection::Messages);
numeric_record!(Notification, Collection::Notifications);

/// Account written into a fresh `users.json`
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl AdminSeed {
    pub const ID: &'static str = "admin";

    fn into_user(self) -> User {
        User {
            id: Self::ID.to_string(),
            avatar: default_avatar(&self.username),
            username: self.username,
            password: self.password,
            email: self.email,
            bio: "Official administrator account".to_string(),
            is_admin: true,
            created_at: Utc::now(),
        }
    }
}

/// Flat-file store rooted at one directory
pub struct JsonStore {
    dir: PathBuf,
    locks: HashMap<Collection, Mutex<()>>,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let locks = Collection::ALL
            .iter()
            .map(|collection| (*collection, Mutex::new(())))
            .collect();
        Self {
            dir: dir.into(),
            locks,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(collection.file_name())
    }

    fn lock(&self, collection: Collection) -> &Mutex<()> {
        // Every collection gets a lock in `new`.
        &self.locks[&collection]
    }

    /// Create the data directory and any missing collection file
    ///
    /// A fresh `users.json` is seeded with the admin account. Other existing
    /// files are left untouched; an existing `users.json` only gets the admin
    /// flag restored on the seeded account when it predates that field.
    pub async fn init(&self, admin: AdminSeed) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?;

        for collection in Collection::ALL {
            let path = self.path(collection);
            let exists = tokio::fs::try_exists(&path)
                .await
                .map_err(|e| StoreError::io(&path, e))?;
            if exists {
                if collection == Collection::Users {
                    self.backfill_admin_flag().await?;
                }
                continue;
            }

            tracing::info!("Creating collection file {}", path.display());
            if collection == Collection::Users {
                self.save(&[admin.clone().into_user()]).await?;
            } else {
                self.write_raw(collection, b"[]").await?;
            }
        }

        Ok(())
    }

    async fn backfill_admin_flag(&self) -> Result<(), StoreError> {
        let _guard = self.lock(Collection::Users).lock().await;
        let mut users = self.load::<User>().await?;
        let mut restored = false;
        for user in users.iter_mut().filter(|u| u.id == AdminSeed::ID && !u.is_admin) {
            user.is_admin = true;
            restored = true;
        }
        if restored {
            tracing::info!("Restoring admin flag on account '{}'", AdminSeed::ID);
            self.write_collection(&users).await?;
        }
        Ok(())
    }

    /// Load a whole collection
    ///
    /// An unparsable file is logged and read as empty.
    pub async fn load<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        match self.read_collection::<T>().await {
            Err(StoreError::Corrupt { path, source }) => {
                tracing::warn!(
                    "Collection file {} is not valid JSON ({}), treating as empty",
                    path.display(),
                    source
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn read_collection<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let path = self.path(T::COLLECTION);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Collection file {} missing, treating as empty", path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Replace a whole collection
    pub async fn save<T: Record>(&self, items: &[T]) -> Result<(), StoreError> {
        let _guard = self.lock(T::COLLECTION).lock().await;
        self.write_collection(items).await
    }

    /// Run a read-modify-write cycle on one collection
    ///
    /// The collection lock is held from load to save. The collection is
    /// written back only when `f` returns `Ok`. An unparsable file fails with
    /// [`StoreError::Corrupt`] and is never overwritten.
    pub async fn update<T, R, E, F>(&self, f: F) -> Result<R, E>
    where
        T: Record,
        E: From<StoreError>,
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
    {
        let _guard = self.lock(T::COLLECTION).lock().await;
        let mut items = self.read_collection::<T>().await?;
        let result = f(&mut items)?;
        self.write_collection(&items).await?;
        Ok(result)
    }

    /// Largest numeric id across all collections
    pub async fn max_record_id(&self) -> Result<RecordId, StoreError> {
        let mut max = 0;
        max = max.max(Self::max_id(&self.load::<User>().await?));
        max = max.max(Self::max_id(&self.load::<Post>().await?));
        max = max.max(Self::max_id(&self.load::<Follow>().await?));
        max = max.max(Self::max_id(&self.load::<Like>().await?));
        max = max.max(Self::max_id(&self.load::<Comment>().await?));
        max = max.max(Self::max_id(&self.load::<Message>().await?));
        max = max.max(Self::max_id(&self.load::<Notification>().await?));
        Ok(max)
    }

    fn max_id<T: Record>(items: &[T]) -> RecordId {
        items.iter().filter_map(|item| item.record_id()).max().unwrap_or(0)
    }

    async fn write_collection<T: Record>(&self, items: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(items)?;
        self.write_raw(T::COLLECTION, &bytes).await
    }

    async fn write_raw(&self, collection: Collection, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path(collection);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
