use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Durable string key-value storage. Writing a key replaces its previous value.
#[mockall::automock]
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save(&self, key: &str, value: String) -> Result<()>;
    async fn load(&self, key: &str) -> Result<Option<String>>;
}

pub async fn save_json<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<()> {
    let serialized = serde_json::to_string(value)?;
    debug!("Saving {} bytes under \"{}\"", serialized.len(), key);
    storage.save(key, serialized).await
}

pub async fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    match storage.load(key).await? {
        Some(serialized) => Ok(Some(serde_json::from_str(&serialized)?)),
        None => Ok(None),
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save(&self, key: &str, value: String) -> Result<()> {
        self.entries.lock().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use slimmom_model::measurement::{BloodType, UserMeasurements};

    use super::*;

    #[tokio::test]
    async fn last_write_wins() {
        let storage = MemoryStorage::new();

        storage.save("params", "first".to_owned()).await.unwrap();
        storage.save("params", "second".to_owned()).await.unwrap();

        assert_eq!(
            storage.load("params").await.unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(storage.load("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn json_helpers_store_serialized_records() {
        let storage = MemoryStorage::new();
        let measurements = UserMeasurements::new(170, 30, 80, 70, BloodType::A).unwrap();

        save_json(&storage, "params", &measurements).await.unwrap();

        assert_eq!(
            storage.load("params").await.unwrap().as_deref(),
            Some(r#"{"height":170,"age":30,"currentWeight":80,"desiredWeight":70,"bloodType":2}"#)
        );
        let loaded: Option<UserMeasurements> = load_json(&storage, "params").await.unwrap();
        assert_eq!(loaded, Some(measurements));
    }

    #[tokio::test]
    async fn load_json_reports_corrupted_values() {
        let storage = MemoryStorage::new();
        storage.save("params", "{not json".to_owned()).await.unwrap();

        let loaded = load_json::<UserMeasurements>(&storage, "params").await;

        assert!(matches!(loaded, Err(Error::Serialization(_))));
    }
}
