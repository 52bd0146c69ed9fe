use std::{
    collections::BTreeMap,
    env,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use dotenv::dotenv;
use log::{debug, info};
use tokio::{fs, sync::Mutex};

use crate::storage::{Result, Storage};

const DEFAULT_STORAGE_PATH: &str = "slimmom-storage.json";

/// Storage persisted as a single JSON object file, one string entry per key.
#[derive(Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FileStorage {
    pub async fn open_from_env() -> Result<Self> {
        dotenv().ok();
        let path =
            env::var("SLIMMOM_STORAGE_PATH").unwrap_or_else(|_| DEFAULT_STORAGE_PATH.to_owned());
        Self::open(path).await
    }

    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        info!(
            "Opened storage {} with {} entries",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    async fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serde_json::to_vec(entries)?).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn save(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let previous = entries.insert(key.to_owned(), value);
        if let Err(e) = self.flush(&entries).await {
            // keep memory in sync with what is on disk
            match previous {
                Some(previous) => entries.insert(key.to_owned(), previous),
                None => entries.remove(key),
            };
            return Err(e);
        }
        debug!("Stored \"{}\" in {}", key, self.path.display());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }
}
