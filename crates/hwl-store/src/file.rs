use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::context::RequestContext;
use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentStore;

const DOCUMENT_EXTENSION: &str = "json";

/// Directory-backed document store.
///
/// Each document lives in its own JSON file named after the hex encoding of
/// its id, so any id maps to a safe file name. Writes go to a temporary file
/// in the same directory which is then renamed into place: readers never see
/// a half-written document. Creation uses a no-clobber rename, which is what
/// detects `Conflict`.
///
/// Create, update and delete are serialized by one write lock, held until
/// the filesystem work has finished, so an update never recreates a document
/// that a concurrent delete has just removed.
pub struct FileDocumentStore<T> {
    root: PathBuf,
    connected: AtomicBool,
    writes: Arc<Mutex<()>>,
    _documents: PhantomData<fn() -> T>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteMode {
    Create,
    Replace,
}

impl<T> FileDocumentStore<T> {
    /// Open (and create if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::info!(root = %root.display(), "opened file document store");
        Ok(Self {
            root,
            connected: AtomicBool::new(true),
            writes: Arc::new(Mutex::new(())),
            _documents: PhantomData,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.root
            .join(format!("{}.{DOCUMENT_EXTENSION}", hex::encode(id.as_bytes())))
    }

    fn ensure_connected(&self) -> StoreResult<()> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Disconnected)
        }
    }

    /// Run `work` on the blocking pool under the write lock. The guard moves
    /// into the task, so the lock outlives a dropped (cancelled) caller.
    async fn locked<R, F>(&self, work: F) -> StoreResult<R>
    where
        F: FnOnce() -> StoreResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let guard = self.writes.clone().lock_owned().await;
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            work()
        })
        .await
        .map_err(|e| StoreError::Backend(format!("store task failed: {e}")))?
    }

    async fn write_document(
        &self,
        ctx: &RequestContext,
        id: &str,
        bytes: Vec<u8>,
        mode: WriteMode,
    ) -> StoreResult<()> {
        let dir = self.root.clone();
        let path = self.path_for(id);
        let id = id.to_string();
        let token = ctx.token().clone();
        self.locked(move || {
            if mode == WriteMode::Replace && !path.try_exists()? {
                return Err(StoreError::NotFound(id));
            }
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.as_file().sync_all()?;
            // last point at which a cancelled request leaves no trace
            if token.is_cancelled() {
                return Err(StoreError::Cancelled);
            }
            match mode {
                WriteMode::Replace => {
                    tmp.persist(&path).map_err(|e| e.error)?;
                }
                WriteMode::Create => match tmp.persist_noclobber(&path) {
                    Ok(_) => {}
                    Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                        return Err(StoreError::Conflict(id));
                    }
                    Err(e) => return Err(e.error.into()),
                },
            }
            Ok(())
        })
        .await
    }
}

fn encode<T: Serialize>(id: &str, document: &T) -> StoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(document)
        .map_err(|e| StoreError::Serialization(format!("{id}: {e}")))
}

fn decode<T: DeserializeOwned>(origin: &str, bytes: &[u8]) -> StoreResult<T> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(format!("{origin}: {e}")))
}

fn not_found_as(id: &str, err: io::Error) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(id.to_string())
    } else {
        StoreError::Io(err)
    }
}

#[async_trait]
impl<T> DocumentStore<T> for FileDocumentStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn create_document(
        &self,
        ctx: &RequestContext,
        id: &str,
        document: &T,
    ) -> StoreResult<()> {
        self.ensure_connected()?;
        let bytes = encode(id, document)?;
        ctx.run(self.write_document(ctx, id, bytes, WriteMode::Create))
            .await
    }

    async fn list_documents(&self, ctx: &RequestContext) -> StoreResult<Vec<T>> {
        self.ensure_connected()?;
        ctx.run(async {
            let mut dir = tokio::fs::read_dir(&self.root).await?;
            let mut found = Vec::new();
            while let Some(entry) = dir.next_entry().await? {
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                    continue;
                }
                match tokio::fs::read(&path).await {
                    Ok(bytes) => {
                        let document = decode(&path.display().to_string(), &bytes)?;
                        found.push((path, document));
                    }
                    // removed between read_dir and read
                    Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(e.into()),
                }
            }
            found.sort_by(|(a, _), (b, _)| a.cmp(b));
            Ok(found.into_iter().map(|(_, document)| document).collect())
        })
        .await
    }

    async fn find_document(&self, ctx: &RequestContext, id: &str) -> StoreResult<T> {
        self.ensure_connected()?;
        let path = self.path_for(id);
        ctx.run(async {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| not_found_as(id, e))?;
            decode(id, &bytes)
        })
        .await
    }

    async fn update_document(
        &self,
        ctx: &RequestContext,
        id: &str,
        document: &T,
    ) -> StoreResult<()> {
        self.ensure_connected()?;
        let bytes = encode(id, document)?;
        ctx.run(self.write_document(ctx, id, bytes, WriteMode::Replace))
            .await
    }

    async fn delete_document(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.ensure_connected()?;
        let path = self.path_for(id);
        let id = id.to_string();
        ctx.run(self.locked(move || std::fs::remove_file(&path).map_err(|e| not_found_as(&id, e))))
            .await
    }

    async fn disconnect(&self, _ctx: &RequestContext) -> StoreResult<()> {
        self.connected.store(false, Ordering::SeqCst);
        tracing::info!(root = %self.root.display(), "file document store disconnected");
        Ok(())
    }
}

impl<T> std::fmt::Debug for FileDocumentStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDocumentStore")
            .field("root", &self.root)
            .field("connected", &self.connected.load(Ordering::SeqCst))
            .finish()
    }
}
