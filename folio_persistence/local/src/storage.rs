use std::{
    collections::BTreeMap,
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use tokio::{io::AsyncWriteExt, sync::Mutex};
use tracing::debug;

type Entries = BTreeMap<String, String>;

/// String keyed, string valued store with the semantics of a browser's local
/// storage.
///
/// The file backend keeps all entries in a single JSON object and re-reads it
/// before every operation, so changes made by other processes are picked up.
/// Concurrent writers are last-writer-wins. Within one process, operations
/// on clones of the same `LocalStorage` are serialized.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    backend: Backend,
    entries: Mutex<Entries>,
}

#[derive(Debug)]
enum Backend {
    File(PathBuf),
    Memory,
}

impl LocalStorage {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Backend::File(path.into()))
    }

    /// A store that lives only as long as this value and its clones.
    pub fn memory() -> Self {
        Self::new(Backend::Memory)
    }

    fn new(backend: Backend) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                entries: Default::default(),
            }),
        }
    }

    /// Location of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        match &self.inner.backend {
            Backend::File(path) => Some(path),
            Backend::Memory => None,
        }
    }

    pub async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut entries = self.inner.entries.lock().await;
        self.inner.backend.reload(&mut entries).await?;
        Ok(entries.get(key).cloned())
    }

    pub async fn set_item(&self, key: &str, value: String) -> anyhow::Result<()> {
        self.update_item(key, |_| Ok(Some(value))).await
    }

    pub async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        self.update_item(key, |_| Ok(None)).await
    }

    pub async fn clear(&self) -> anyhow::Result<()> {
        let mut entries = self.inner.entries.lock().await;
        entries.clear();
        self.inner.backend.persist(&entries).await
    }

    /// Replaces the value stored under `key` with the result of `f`, which
    /// receives the current value. Returning `None` removes the key.
    ///
    /// The read and the write happen under one lock. If `f` fails, nothing is
    /// written.
    pub async fn update_item<F>(&self, key: &str, f: F) -> anyhow::Result<()>
    where
        F: FnOnce(Option<&str>) -> anyhow::Result<Option<String>> + Send,
    {
        let mut entries = self.inner.entries.lock().await;
        self.inner.backend.reload(&mut entries).await?;

        match f(entries.get(key).map(String::as_str))? {
            Some(value) => {
                entries.insert(key.to_owned(), value);
            }
            None => {
                entries.remove(key);
            }
        }

        self.inner.backend.persist(&entries).await
    }
}

impl Backend {
    async fn reload(&self, entries: &mut Entries) -> anyhow::Result<()> {
        let Self::File(path) = self else {
            return Ok(());
        };

        *entries = match tokio::fs::read(path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Entries::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).with_context(|| {
                format!("Failed to parse local storage at {}", path.display())
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => Entries::new(),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read local storage at {}", path.display())
                })
            }
        };

        Ok(())
    }

    async fn persist(&self, entries: &Entries) -> anyhow::Result<()> {
        let Self::File(path) = self else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content = serde_json::to_vec_pretty(entries)?;
        let tmp = tmp_path(path);
        write_synced(&tmp, &content)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!(path = %path.display(), entries = entries.len(), "persisted local storage");
        Ok(())
    }
}

/// Writes `content` and flushes it to disk, so a rename never exposes a
/// partially written file.
async fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(content).await?;
    file.sync_all().await
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
